mod ops;

use std::fmt;

use crate::{vec3, vec4, Mat3, Matrix, Number, One, Sqrt, Trig, Vec3, Vector, Zero};

/// A quaternion consisting of 3 imaginary numbers and a real number.
///
/// Unit-length quaternions ("*versors*") are commonly used to represent rotations in 3D space.
///
/// Quaternions are represented similar to a 4-dimensional vector, with an `x`, `y`, `z` and `w`
/// component; `w` is the real part. The components can be accessed as fields, just like on
/// [`Vector`].
///
/// Multiplication is the Hamilton product, *not* an element-wise operation: `a * b` is the
/// rotation `b` followed by the rotation `a` (for unit quaternions). Use [`Quat::rotate`] to
/// apply a rotation to a [`Vec3`].
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Quat<T> {
    vec: Vector<T, 4>,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Quat<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Quat<T> {}

/// A rotation decomposed into angles around the principal axes.
///
/// The angles are in radians; `roll` is the rotation around the X axis, `pitch` around Y, `yaw`
/// around Z, applied in yaw-pitch-roll order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles<T> {
    pub roll: T,
    pub pitch: T,
    pub yaw: T,
}

impl<T: Zero + One> Quat<T> {
    /// The multiplicative identity.
    ///
    /// This is a unit quaternion that will not change a vector it is multiplied with.
    pub const IDENTITY: Self = Self {
        vec: vec4(T::ZERO, T::ZERO, T::ZERO, T::ONE),
    };
}

impl<T> Quat<T> {
    /// Creates a quaternion from a 4-dimensional [`Vector`].
    ///
    /// The `x`, `y`, and `z` coordinates correspond to the `i`, `j`, and `k` imaginary parts, while
    /// the `w` component corresponds to the real number part of the quaternion.
    pub fn from_vec(vec: Vector<T, 4>) -> Self {
        Self { vec }
    }

    pub fn from_components(x: T, y: T, z: T, w: T) -> Self {
        Self {
            vec: [x, y, z, w].into(),
        }
    }

    fn one_half() -> T
    where
        T: Number,
    {
        T::ONE / (T::ONE + T::ONE)
    }

    /// Creates a quaternion that rotates by `radians` around `axis`.
    ///
    /// The axis does not have to be a unit vector; it is normalized internally. A zero-length
    /// axis describes no rotation at all, so [`Quat::IDENTITY`] is returned for it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// use std::f32::consts::TAU;
    ///
    /// let q = Quat::from_angle_axis(TAU / 4.0, Vec3f::Z);
    /// assert_approx_eq!(q.rotate(Vec3f::Y), -Vec3f::X).abs(1e-6);
    /// ```
    pub fn from_angle_axis(radians: T, axis: Vec3<T>) -> Self
    where
        T: Number + Trig + Sqrt,
    {
        let length = axis.length();
        if length == T::ZERO {
            return Self::IDENTITY;
        }
        let axis = axis / length;
        let half = radians * Self::one_half();
        let sin = half.sin();
        Self::from_components(axis.x * sin, axis.y * sin, axis.z * sin, half.cos())
    }

    /// Returns the conjugate of this quaternion (with the imaginary components negated).
    ///
    /// For unit quaternions, the conjugate equals the inverse rotation.
    pub fn conjugate(self) -> Self
    where
        T: Number,
    {
        Self::from_components(-self.x, -self.y, -self.z, self.w)
    }

    /// Computes the 4-dimensional dot product of `self` and `other`.
    pub fn dot(self, other: Self) -> T
    where
        T: Number,
    {
        self.vec.dot(other.vec)
    }

    /// Returns the squared length of this quaternion.
    pub fn length2(&self) -> T
    where
        T: Number,
    {
        self.vec.length2()
    }

    /// Returns the length of this quaternion.
    ///
    /// If the length is not equal to one, multiplying a vector with this quaternion will scale the
    /// vector in addition to rotating it. When using quaternions to model rotations, it is
    /// advisable to ensure that quaternions are always of length one.
    #[doc(alias = "norm", alias = "magnitude")]
    pub fn length(&self) -> T
    where
        T: Number + Sqrt,
    {
        self.vec.length()
    }

    /// Returns a normalized copy of this quaternion (whose length equals one).
    ///
    /// The all-zero quaternion has no defined direction and is returned unchanged.
    pub fn normalize(self) -> Self
    where
        T: Number + Sqrt,
    {
        let length = self.length();
        if length == T::ZERO {
            return self;
        }
        Self {
            vec: self.vec / length,
        }
    }

    /// Rotates `v` by the rotation this quaternion describes.
    ///
    /// `self` must be of unit length for the result to be a pure rotation. The vector is
    /// conjugated by `self` (two Hamilton products), which applies the rotation *actively* in a
    /// right-handed coordinate system.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// use std::f32::consts::TAU;
    ///
    /// let q = Quat::from_angle_axis(TAU / 2.0, Vec3f::Z);
    /// assert_approx_eq!(q.rotate(Vec3f::X), -Vec3f::X).abs(1e-6);
    /// ```
    pub fn rotate(self, v: Vec3<T>) -> Vec3<T>
    where
        T: Number,
    {
        let p = Self::from_components(v.x, v.y, v.z, T::ZERO);
        let rotated = self * p * self.conjugate();
        vec3(rotated.x, rotated.y, rotated.z)
    }

    /// Converts this unit quaternion to the equivalent 3x3 rotation matrix.
    ///
    /// Multiplying a vector with the returned matrix is equivalent to calling
    /// [`Quat::rotate`] with it.
    pub fn to_rotation_matrix(self) -> Mat3<T>
    where
        T: Number,
    {
        let two = T::ONE + T::ONE;
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        Matrix::from_rows([
            [
                T::ONE - two * (y * y + z * z),
                two * (x * y - z * w),
                two * (x * z + y * w),
            ],
            [
                two * (x * y + z * w),
                T::ONE - two * (x * x + z * z),
                two * (y * z - x * w),
            ],
            [
                two * (x * z - y * w),
                two * (y * z + x * w),
                T::ONE - two * (x * x + y * y),
            ],
        ])
    }

    /// Extracts the Euler angles of the rotation this unit quaternion describes.
    ///
    /// At the poles (pitch of ±90°), roll and yaw describe the same rotation; the reported pitch
    /// saturates at ±90° instead of becoming NaN.
    pub fn to_euler_angles(self) -> EulerAngles<T>
    where
        T: Number + Trig + PartialOrd,
    {
        let two = T::ONE + T::ONE;
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);

        let roll = (two * (w * x + y * z)).atan2(T::ONE - two * (x * x + y * y));

        // Rounding can push the sine slightly outside [-1, 1] at the poles.
        let mut sin_pitch = two * (w * y - z * x);
        if sin_pitch > T::ONE {
            sin_pitch = T::ONE;
        } else if sin_pitch < -T::ONE {
            sin_pitch = -T::ONE;
        }
        let pitch = sin_pitch.asin();

        let yaw = (two * (w * z + x * y)).atan2(T::ONE - two * (y * y + z * z));

        EulerAngles { roll, pitch, yaw }
    }
}

impl<T> From<[T; 4]> for Quat<T> {
    fn from(value: [T; 4]) -> Self {
        Self { vec: value.into() }
    }
}

/// Interprets a single-row matrix as a quaternion in `(w, x, y, z)` storage order.
impl<T: Copy> From<Matrix<T, 1, 4>> for Quat<T> {
    fn from(value: Matrix<T, 1, 4>) -> Self {
        Self::from_components(value[(0, 1)], value[(0, 2)], value[(0, 3)], value[(0, 0)])
    }
}

impl<T: fmt::Debug> fmt::Debug for Quat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quat{:?}", self.vec)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use crate::assert_approx_eq;

    use super::*;

    type Quatf = Quat<f64>;

    #[test]
    fn hamilton_product() {
        let a = Quat::from_components(2, 3, 4, 1);
        let b = Quat::from_components(6, 7, 8, 5);
        let prod = a * b;
        assert_eq!(prod.w, -60);
        assert_eq!(prod.x, 12);
        assert_eq!(prod.y, 30);
        assert_eq!(prod.z, 24);

        // The Hamilton product is not commutative.
        let prod = b * a;
        assert_eq!(prod.w, -60);
        assert_eq!(prod.x, 20);
        assert_eq!(prod.y, 14);
        assert_eq!(prod.z, 32);
    }

    #[test]
    fn identity() {
        let q = Quat::from_angle_axis(1.25, vec3(1.0, -2.0, 0.5)).normalize();
        let id = Quatf::IDENTITY;
        assert_approx_eq!((q * id).vec, q.vec);
        assert_approx_eq!((id * q).vec, q.vec);
        assert_eq!(id.rotate(vec3(1.0, 2.0, 3.0)), vec3(1.0, 2.0, 3.0));
    }

    #[test]
    fn angle_axis() {
        // The axis is normalized internally.
        let a = Quat::from_angle_axis(0.75, vec3(0.0, 0.0, 5.0));
        let b = Quat::from_angle_axis(0.75, vec3(0.0, 0.0, 1.0));
        assert_approx_eq!(a.vec, b.vec);
        assert_approx_eq!(a.length(), 1.0);

        // A zero axis describes no rotation.
        let q = Quat::from_angle_axis(0.75, Vec3::ZERO);
        assert_eq!(q.vec, Quatf::IDENTITY.vec);
    }

    #[test]
    fn rotate() {
        // A quarter turn around Z maps +Y onto -X.
        let q = Quat::from_angle_axis(TAU / 4.0, Vec3::Z);
        // Negation erases the element type, so spell it out on the right-hand sides.
        assert_approx_eq!(q.rotate(Vec3::Y), -Vec3::<f64>::X).abs(1e-12);
        assert_approx_eq!(q.rotate(Vec3::X), Vec3::Y).abs(1e-12);
        // The rotation axis is unaffected.
        assert_approx_eq!(q.rotate(Vec3::Z), Vec3::Z).abs(1e-12);

        // Two quarter turns make a half turn.
        assert_approx_eq!(q.rotate(q.rotate(Vec3::Y)), -Vec3::<f64>::Y).abs(1e-12);
        assert_approx_eq!((q * q).rotate(Vec3::Y), -Vec3::<f64>::Y).abs(1e-12);
    }

    #[test]
    fn normalize() {
        let q = Quat::from_components(1.0, -2.0, 3.0, 4.0).normalize();
        assert_approx_eq!(q.length(), 1.0);

        // The zero quaternion stays unchanged.
        let zero = Quat::from_components(0.0, 0.0, 0.0, 0.0);
        let q = zero.normalize();
        assert_eq!(q.vec, zero.vec);
    }

    #[test]
    fn rotation_matrix() {
        let q = Quat::from_angle_axis(TAU / 4.0, Vec3::Z);
        let mat = q.to_rotation_matrix();
        assert_approx_eq!(mat * Vec3::Y, vec3(-1.0, 0.0, 0.0)).abs(1e-12);

        // The matrix agrees with `rotate` for an arbitrary rotation.
        let q = Quat::from_angle_axis(1.1, vec3(1.0, 2.0, -0.5));
        let mat = q.to_rotation_matrix();
        let v = vec3(0.3, -4.0, 2.5);
        assert_approx_eq!(mat * v, q.rotate(v)).abs(1e-12);

        assert_approx_eq!(
            Quatf::IDENTITY.to_rotation_matrix(),
            Matrix::IDENTITY
        );
    }

    #[test]
    fn euler_angles() {
        let q = Quat::from_angle_axis(0.5, Vec3::Z);
        let angles = q.to_euler_angles();
        assert_approx_eq!(angles.yaw, 0.5).abs(1e-12);
        assert_approx_eq!(angles.pitch, 0.0).abs(1e-12);
        assert_approx_eq!(angles.roll, 0.0).abs(1e-12);

        let q = Quat::from_angle_axis(0.25, Vec3::X);
        assert_approx_eq!(q.to_euler_angles().roll, 0.25).abs(1e-12);

        // Pitch saturates at the poles instead of producing NaN.
        let q = Quat::from_angle_axis(TAU / 4.0, Vec3::Y);
        assert_approx_eq!(q.to_euler_angles().pitch, TAU / 4.0).abs(1e-6);
        let q = Quat::from_angle_axis(-TAU / 4.0, Vec3::Y);
        assert_approx_eq!(q.to_euler_angles().pitch, -TAU / 4.0).abs(1e-6);
    }

    #[test]
    fn add_and_scale() {
        let a = Quat::from_components(1, 2, 3, 4);
        let b = Quat::from_components(10, 20, 30, 40);
        let sum = a + b;
        assert_eq!(sum.vec, vec4(11, 22, 33, 44));
        let scaled = a * 2;
        assert_eq!(scaled.vec, vec4(2, 4, 6, 8));
    }

    #[test]
    fn from_row_matrix() {
        // Row storage order is (w, x, y, z).
        let q = Quat::from(Matrix::from_rows([[4, 1, 2, 3]]));
        assert_eq!(q.x, 1);
        assert_eq!(q.y, 2);
        assert_eq!(q.z, 3);
        assert_eq!(q.w, 4);
    }

    #[test]
    fn field_access() {
        let mut q = Quat::from_components(1.0, 2.0, 3.0, 4.0);
        q.x = 7.0;
        assert_eq!(q.x, 7.0);
        assert_eq!(q.y, 2.0);
        assert_eq!(q.z, 3.0);
        assert_eq!(q.w, 4.0);
    }
}
