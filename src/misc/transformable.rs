/// A trait for objects that can be transformed by a given type.
///
/// Surfaces and curves implement it for `&Matrix4<T>`, applying the matrix
/// to every control point as a homogeneous transform.
pub trait Transformable<T>: Clone {
    fn transform(&mut self, transform: T);

    /// Return a transformed copy, leaving `self` untouched
    fn transformed(&self, transform: T) -> Self {
        let mut clone = self.clone();
        clone.transform(transform);
        clone
    }
}
