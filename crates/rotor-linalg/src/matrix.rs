use std::{array, fmt};

use crate::{Number, One, Sqrt, Vector, Zero};

mod ops;

/// A 1x1 matrix.
pub type Mat1<T> = Matrix<T, 1, 1>;
/// A 1x1 matrix with [`f32`] elements.
pub type Mat1f = Mat1<f32>;
/// A 2x2 matrix.
pub type Mat2<T> = Matrix<T, 2, 2>;
/// A 2x2 matrix with [`f32`] elements.
pub type Mat2f = Mat2<f32>;
/// A 3x3 matrix.
pub type Mat3<T> = Matrix<T, 3, 3>;
/// A 3x3 matrix with [`f32`] elements.
pub type Mat3f = Mat3<f32>;
/// A 4x4 matrix.
pub type Mat4<T> = Matrix<T, 4, 4>;
/// A 4x4 matrix with [`f32`] elements.
pub type Mat4f = Mat4<f32>;

/// A dense, row-major matrix with `R` rows and `C` columns, and element type `T`.
///
/// The shape of a matrix is part of its type and can never change. Operations that relate several
/// shapes (products, sub-matrix extraction, minors) encode the relationship in their signatures,
/// so mismatched dimensions fail to compile rather than panic.
///
/// # Construction
///
/// There are several ways to create a [`Matrix`]:
///
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] allow filling a matrix with raw elements,
///   as well as creating them from an array of row or column vectors.
/// - Matrices can be converted from (and back into) a nested `[[T; C]; R]` array in row-major
///   order via their [`From`] impls.
/// - [`Matrix::from_fn`] will create each element by invoking a closure with its row and column.
/// - [`Matrix::from_slice`] fills a matrix row by row from a flat slice, zero-padding or
///   truncating as needed.
/// - [`Matrix::splat`] copies a single value into every element.
/// - For square matrices (where `R` equals `C`), [`Matrix::from_diagonal`] can be used to create a
///   matrix with a specified diagonal and zero outside of its diagonal.
///
/// Additionally, some associated constants for commonly used matrices are defined:
///
/// - [`Matrix::ZERO`] is a matrix with every element set to 0.
/// - [`Matrix::IDENTITY`] is a matrix with 1 on its main diagonal and 0 everywhere else.
///
/// # Element Access
///
/// [`Matrix`] implements the [`Index`] and [`IndexMut`] traits for tuples of `(usize, usize)`. The
/// first element of the tuple is the *row* (Y coordinate), the second is the *column* (X
/// coordinate), matching common mathematical notation. Indices are 0-based.
///
/// ```
/// # use rotor_linalg::*;
/// let mut mat = Matrix::from_rows([
///     [0, 1]
/// ]);
/// mat[(0, 0)] = 4;
/// assert_eq!(mat[(0, 0)], 4);
/// assert_eq!(mat[(0, 1)], 1);
/// ```
///
/// Indexing out of bounds will result in a panic, just like it does for slices. [`Matrix::get`] and
/// [`Matrix::get_mut`] return [`Option`]s instead and can be used for checked indexing:
///
/// ```
/// # use rotor_linalg::*;
/// let mut mat = Matrix::from_rows([
///     [0, 1]
/// ]);
/// assert_eq!(mat.get(0, 0), Some(&0));
/// assert_eq!(mat.get(0, 1), Some(&1));
/// assert_eq!(mat.get(0, 2), None);
/// ```
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Matrix<T, const R: usize, const C: usize>([[T; C]; R]);

#[rustfmt::skip]
unsafe impl<T: bytemuck::Zeroable, const R: usize, const C: usize> bytemuck::Zeroable for Matrix<T, R, C> {}
unsafe impl<T: bytemuck::Pod, const R: usize, const C: usize> bytemuck::Pod for Matrix<T, R, C> {}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The smallest dimension of the matrix (`R` or `C`).
    const MIN_DIMENSION: usize = if R > C { C } else { R };

    /// Creates a [`Matrix`] from an array of row vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let rows = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Matrix::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub fn from_rows<U: Into<Vector<T, C>>>(rows: [U; R]) -> Self {
        Self(rows.map(|row| row.into().into_array()))
    }

    /// Creates a [`Matrix`] from an array of column vectors.
    pub fn from_columns<U: Into<Vector<T, R>>>(columns: [U; C]) -> Self
    where
        T: Copy,
    {
        let columns = columns.map(|col| col.into().into_array());
        Self::from_fn(|row, col| columns[col][row])
    }

    /// Creates a [`Matrix`] by invoking a closure with the position (row and column) of each element.
    ///
    /// This mirrors [`array::from_fn`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_fn(|row, col| row * 10 + col);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(array::from_fn(|row| array::from_fn(|col| cb(row, col))))
    }

    /// Creates a matrix with every element initialized to `elem`.
    #[inline]
    pub fn splat(elem: T) -> Self
    where
        T: Copy,
    {
        Self::from_fn(|_, _| elem)
    }

    /// Creates a [`Matrix`] from a flat slice of elements in row-major order.
    ///
    /// If the slice holds fewer than `R * C` elements, the remaining elements are initialized
    /// with zero; excess elements are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Mat2::from_slice(&[1, 2, 3]);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 0],
    /// ]));
    /// ```
    pub fn from_slice(elems: &[T]) -> Self
    where
        T: Zero + Copy,
    {
        Self::from_fn(|row, col| elems.get(row * C + col).copied().unwrap_or(T::ZERO))
    }

    /// Applies a closure to each element, returning a new matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// let mat = mat.map(|i| i * 2);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  2,  4],
    ///     [ 6,  8, 10],
    /// ]));
    /// ```
    pub fn map<F, U>(self, mut f: F) -> Matrix<U, R, C>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(|row| row.map(|v| f(v))))
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]).transpose();
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]));
    /// ```
    pub fn transpose(self) -> Matrix<T, C, R>
    where
        T: Copy,
    {
        Matrix::from_fn(|row, col| self[(col, row)])
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.get(0, 0), Some(&0));
    /// assert_eq!(mat.get(1, 0), Some(&3));
    /// assert_eq!(mat.get(2, 0), None);
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.0.get(row).and_then(|row| row.get(col))
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`] if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mut mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// if let Some(elem) = mat.get_mut(1, 0) {
    ///     *elem = 999;
    /// }
    /// if let Some(elem) = mat.get_mut(2, 0) {
    ///     *elem = 777;
    /// }
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [999, 4, 5],
    /// ]));
    /// ```
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.0.get_mut(row).and_then(|row| row.get_mut(col))
    }

    /// Returns the row at index `row` as a [`Vector`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.row(1), vec3(3, 4, 5));
    /// ```
    pub fn row(&self, row: usize) -> Vector<T, C>
    where
        T: Copy,
    {
        Vector::from_fn(|col| self[(row, col)])
    }

    /// Returns the column at index `col` as a [`Vector`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.column(1), vec2(1, 4));
    /// ```
    pub fn column(&self, col: usize) -> Vector<T, R>
    where
        T: Copy,
    {
        Vector::from_fn(|row| self[(row, col)])
    }

    /// Copies the `R2 x C2` block whose top-left corner is at `(row, col)` into a new matrix.
    ///
    /// The block shape is checked at compile time to fit inside `self`; the offsets are
    /// bounds-checked like indexing.
    ///
    /// # Panics
    ///
    /// Panics if the block extends past the last row or column of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// let sub = mat.submatrix::<1, 2>(1, 1);
    /// assert_eq!(sub, Matrix::from_rows([[4, 5]]));
    /// ```
    pub fn submatrix<const R2: usize, const C2: usize>(
        &self,
        row: usize,
        col: usize,
    ) -> Matrix<T, R2, C2>
    where
        T: Copy,
    {
        const {
            assert!(R2 <= R && C2 <= C, "sub-matrix shape exceeds matrix shape");
        }
        assert!(
            row + R2 <= R && col + C2 <= C,
            "sub-matrix extends past the matrix bounds"
        );
        Matrix::from_fn(|i, j| self[(row + i, col + j)])
    }

    /// Overwrites the `R2 x C2` block whose top-left corner is at `(row, col)` with `sub`.
    ///
    /// The block shape is checked at compile time to fit inside `self`; the offsets are
    /// bounds-checked like indexing.
    ///
    /// # Panics
    ///
    /// Panics if the block extends past the last row or column of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mut mat = Mat3::<i32>::ZERO;
    /// mat.set_submatrix(1, 1, Matrix::from_rows([[1, 2], [3, 4]]));
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 0, 0],
    ///     [0, 1, 2],
    ///     [0, 3, 4],
    /// ]));
    /// ```
    pub fn set_submatrix<const R2: usize, const C2: usize>(
        &mut self,
        row: usize,
        col: usize,
        sub: Matrix<T, R2, C2>,
    ) where
        T: Copy,
    {
        const {
            assert!(R2 <= R && C2 <= C, "sub-matrix shape exceeds matrix shape");
        }
        assert!(
            row + R2 <= R && col + C2 <= C,
            "sub-matrix extends past the matrix bounds"
        );
        for i in 0..R2 {
            for j in 0..C2 {
                self[(row + i, col + j)] = sub[(i, j)];
            }
        }
    }

    /// Multiplies `self` and `other` element by element.
    ///
    /// This is *not* the matrix product; use the `*` operator for that.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let a = Matrix::from_rows([[1, 2], [3, 4]]);
    /// let b = Matrix::from_rows([[5, 6], [7, 8]]);
    /// assert_eq!(a.component_mul(b), Matrix::from_rows([[5, 12], [21, 32]]));
    /// ```
    pub fn component_mul(self, other: Self) -> Self
    where
        T: Number,
    {
        Self::from_fn(|i, j| self[(i, j)] * other[(i, j)])
    }

    /// Divides `self` by `other` element by element.
    ///
    /// Division by zero follows the element type's semantics (infinity or NaN for floats).
    pub fn component_div(self, other: Self) -> Self
    where
        T: Number,
    {
        Self::from_fn(|i, j| self[(i, j)] / other[(i, j)])
    }

    /// Returns the Frobenius norm of this matrix (the square root of the sum of all squared
    /// elements).
    pub fn frobenius_norm(&self) -> T
    where
        T: Number + Sqrt,
    {
        let mut sum = T::ZERO;
        for i in 0..R {
            for j in 0..C {
                sum = sum + self[(i, j)] * self[(i, j)];
            }
        }
        sum.sqrt()
    }

    /// Divides every element by the Frobenius norm of the matrix.
    ///
    /// Returns [`None`] if the norm is zero (ie. for [`Matrix::ZERO`]).
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([[0.0, 3.0], [4.0, 0.0]]);
    /// let unit = mat.normalized().unwrap();
    /// assert_approx_eq!(unit.frobenius_norm(), 1.0);
    /// assert_eq!(Mat2f::ZERO.normalized(), None);
    /// ```
    pub fn normalized(self) -> Option<Self>
    where
        T: Number + Sqrt,
    {
        let norm = self.frobenius_norm();
        if norm == T::ZERO {
            None
        } else {
            Some(self.map(|elem| elem / norm))
        }
    }

    /// Computes the outer product of a column vector and a row vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::outer(vec2(1, 2), vec3(3, 4, 5));
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [3, 4, 5],
    ///     [6, 8, 10],
    /// ]));
    /// ```
    pub fn outer(a: Vector<T, R>, b: Vector<T, C>) -> Self
    where
        T: Number,
    {
        Self::from_fn(|i, j| a[i] * b[j])
    }

    /// Decomposes `self` into an orthonormal matrix `Q` and an upper-triangular matrix `R`, such
    /// that `Q * R` equals `self`.
    ///
    /// The decomposition applies one Householder reflection per pivot column. Each reflection
    /// uses the sign of the pivot element to pick the reflection target on the side that avoids
    /// cancellation, so the diagonal of the returned triangular factor is not necessarily
    /// positive. A pivot column that is already entirely zero is skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let a = Matrix::from_rows([
    ///     [2.0, 0.0],
    ///     [0.0, 3.0],
    /// ]);
    /// let (q, r) = a.qr();
    /// assert_approx_eq!(q * r, a).abs(1e-6);
    /// ```
    pub fn qr(&self) -> (Matrix<T, R, R>, Matrix<T, R, C>)
    where
        T: Number + Sqrt + PartialOrd,
    {
        let two = T::ONE + T::ONE;
        let mut q = Matrix::<T, R, R>::IDENTITY;
        let mut r = *self;

        for k in 0..Self::MIN_DIMENSION {
            // Householder vector for the pivot column, zero-padded above the pivot so that the
            // reflection leaves the already-triangularized rows untouched.
            let mut v = Vector::<T, R>::ZERO;
            for i in k..R {
                v[i] = r[(i, k)];
            }
            let norm = v.length();
            if norm == T::ZERO {
                continue;
            }
            // Reflect onto the axis side that is farther from the pivot column.
            let alpha = if v[k] >= T::ZERO { norm } else { -norm };
            v[k] = v[k] + alpha;
            // `v[k]` now has magnitude `|r[(k, k)]| + norm > 0`, so `v` is normalizable.
            let v = v.normalize();

            // R <- (I - 2vvᵀ) R, Q <- Q (I - 2vvᵀ), using rank-1 updates.
            let vt_r =
                Vector::<T, C>::from_fn(|j| (0..R).fold(T::ZERO, |acc, i| acc + v[i] * r[(i, j)]));
            r = r - Matrix::outer(v, vt_r) * two;
            let q_v =
                Vector::<T, R>::from_fn(|i| (0..R).fold(T::ZERO, |acc, j| acc + q[(i, j)] * v[j]));
            q = q - Matrix::outer(q_v, v) * two;
        }

        (q, r)
    }
}

impl<T: Zero + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// A matrix with every element set to 0.
    pub const ZERO: Self = Self([[T::ZERO; C]; R]);
}

impl<T: Zero + One + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The identity matrix.
    ///
    /// The matrix has the value 1 on its main diagonal and 0 everywhere else. For non-square
    /// shapes, the diagonal ends at the smaller dimension.
    ///
    /// Multiplying any vector with this matrix returns the vector unchanged.
    pub const IDENTITY: Self = {
        let mut mat = Self::ZERO;
        let mut i = 0;
        while i < Self::MIN_DIMENSION {
            mat.0[i][i] = T::ONE;
            i += 1;
        }
        mat
    };
}

impl<T, const N: usize> Matrix<T, N, N> {
    /// Returns a [`Vector`] holding the diagonal elements of this square matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(mat.into_diagonal(), [1, 4]);
    /// ```
    pub fn into_diagonal(self) -> Vector<T, N>
    where
        T: Copy,
    {
        array::from_fn(|i| self[(i, i)]).into()
    }

    /// Creates a square matrix from its diagonal.
    ///
    /// Elements outside the diagonal will be initialized with zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let diag = Matrix::from_diagonal([1, 2, 3]);
    /// assert_eq!(diag, Matrix::from_rows([
    ///     [1, 0, 0],
    ///     [0, 2, 0],
    ///     [0, 0, 3],
    /// ]));
    /// ```
    pub fn from_diagonal<D: Into<Vector<T, N>>>(diag: D) -> Self
    where
        T: Zero + Copy,
    {
        let diag = diag.into();
        let mut this = Self::ZERO;
        for i in 0..N {
            this[(i, i)] = diag[i];
        }
        this
    }

    /// Returns the *trace* of the matrix (the sum of all elements on the diagonal).
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let diag = Matrix::from_diagonal([1, 2, 3]);
    /// assert_eq!(diag.trace(), 1 + 2 + 3);
    ///
    /// assert_eq!(Mat3f::IDENTITY.trace(), 3.0);
    /// ```
    pub fn trace(&self) -> T
    where
        T: Number,
    {
        (0..N).fold(T::ZERO, |acc, i| acc + self[(i, i)])
    }
}

impl<T: Number, const N: usize> Matrix<T, N, N> {
    /// Returns the [determinant] of the matrix.
    ///
    /// This uses cofactor expansion along the rows, which is exponential in `N`. The intended use
    /// is for the small shapes typical of geometry code; for a 0x0 matrix the empty product 1 is
    /// returned.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(mat.determinant(), -2);
    /// assert_eq!(Mat3f::IDENTITY.determinant(), 1.0);
    /// ```
    pub fn determinant(&self) -> T {
        let mut cols = [true; N];
        self.expand_cofactors(0, N, &mut cols)
    }

    /// Determinant of the minor obtained by deleting `row` and `col`.
    fn minor_determinant(&self, row: usize, col: usize) -> T {
        let mut cols = [true; N];
        cols[col] = false;
        self.expand_cofactors(0, row, &mut cols)
    }

    /// Cofactor expansion over the rows starting at `row`, restricted to the columns still marked
    /// in `cols` and skipping `skip_row`. Recursing over a column mask avoids materializing the
    /// minors, whose shrunken shapes cannot be spelled without `generic_const_exprs`.
    fn expand_cofactors(&self, row: usize, skip_row: usize, cols: &mut [bool; N]) -> T {
        let row = if row == skip_row { row + 1 } else { row };
        if row >= N {
            return T::ONE;
        }

        let mut det = T::ZERO;
        let mut sign = T::ONE;
        for col in 0..N {
            if !cols[col] {
                continue;
            }
            cols[col] = false;
            det = det + sign * self[(row, col)] * self.expand_cofactors(row + 1, skip_row, cols);
            cols[col] = true;
            sign = -sign;
        }
        det
    }

    /// Copies this matrix with row `row` and column `col` removed, preserving the relative order
    /// of the remaining elements.
    ///
    /// The output shape is checked at compile time to be exactly one row and one column smaller
    /// than `self`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` are out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    ///     [7, 8, 9],
    /// ]);
    /// assert_eq!(mat.minor::<2, 2>(0, 1), Matrix::from_rows([
    ///     [4, 6],
    ///     [7, 9],
    /// ]));
    /// ```
    pub fn minor<const R2: usize, const C2: usize>(
        &self,
        row: usize,
        col: usize,
    ) -> Matrix<T, R2, C2> {
        const {
            assert!(
                R2 + 1 == N && C2 + 1 == N,
                "minor must be one row and one column smaller than the matrix"
            );
        }
        assert!(row < N && col < N, "minor position out of bounds");
        Matrix::from_fn(|i, j| {
            let i = if i < row { i } else { i + 1 };
            let j = if j < col { j } else { j + 1 };
            self[(i, j)]
        })
    }

    /// Returns the matrix in which every element is replaced by the determinant of its minor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    ///     [7, 8, 9],
    /// ]);
    /// assert_eq!(mat.matrix_of_minors()[(0, 0)], -3);
    /// ```
    pub fn matrix_of_minors(&self) -> Self {
        Self::from_fn(|i, j| self.minor_determinant(i, j))
    }

    /// Returns the [adjugate] of this matrix (the transposed matrix of cofactors).
    ///
    /// [adjugate]: https://en.wikipedia.org/wiki/Adjugate_matrix
    pub fn adjugate(&self) -> Self {
        Self::from_fn(|i, j| {
            let minor = self.minor_determinant(j, i);
            if (i + j) % 2 == 0 {
                minor
            } else {
                -minor
            }
        })
    }

    /// Inverts this matrix, returning [`None`] if it is singular (ie. if its
    /// [`determinant()`][Self::determinant] is zero).
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotor_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [1.0, 2.0],
    ///     [3.0, 4.0],
    /// ]);
    /// let inv = mat.invert().unwrap();
    /// assert_approx_eq!(inv * mat, Mat2::IDENTITY).abs(1e-6);
    ///
    /// assert_eq!(Mat2f::ZERO.invert(), None);
    /// ```
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == T::ZERO {
            return None;
        }
        Some(self.adjugate() * (T::ONE / det))
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T, R, C> {
    #[inline]
    fn from(value: [[T; C]; R]) -> Self {
        Self(value)
    }
}

impl<T, const R: usize, const C: usize> From<Matrix<T, R, C>> for [[T; C]; R] {
    #[inline]
    fn from(value: Matrix<T, R, C>) -> Self {
        value.0
    }
}

impl<T, const R: usize, const C: usize> Default for Matrix<T, R, C>
where
    T: Default,
{
    fn default() -> Self {
        Self::from_fn(|_, _| T::default())
    }
}

impl<T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a, T: fmt::Debug, const R: usize, const C: usize>(
            &'a Matrix<T, R, C>,
            usize,
        );
        impl<'a, T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for FormatRow<'a, T, R, C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for col in 0..C {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", self.0[(self.1, col)])?;
                }
                write!(f, "]")?;
                Ok(())
            }
        }

        let mut list = f.debug_list();
        for row in 0..R {
            list.entry(&FormatRow(self, row));
        }
        list.finish()
    }
}

/// Renders the matrix for diagnostics: one `|`-delimited line per row, elements separated by
/// tabs. This is not a parseable serialization format.
impl<T: fmt::Display, const R: usize, const C: usize> fmt::Display for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..R {
            write!(f, "|")?;
            for col in 0..C {
                if col != 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{}", self[(row, col)])?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_approx_eq, vec2, vec3};

    use super::*;

    #[test]
    fn from_rows_columns() {
        assert_eq!(
            Matrix::<_, 2, 3>::from_rows([[1, 2, 3], [4, 5, 6]]),
            Matrix::from_columns([[1, 4], [2, 5], [3, 6]]),
        );

        let mat = Matrix::from([[1, 2], [3, 4]]);
        assert_eq!(mat, Matrix::from_rows([[1, 2], [3, 4]]));
        assert_eq!(<[[i32; 2]; 2]>::from(mat), [[1, 2], [3, 4]]);
    }

    #[test]
    fn from_slice() {
        assert_eq!(
            Mat2::from_slice(&[1, 2, 3, 4]),
            Matrix::from_rows([[1, 2], [3, 4]])
        );
        // Short input is zero-padded, long input is truncated.
        assert_eq!(
            Mat2::from_slice(&[1, 2, 3]),
            Matrix::from_rows([[1, 2], [3, 0]])
        );
        assert_eq!(
            Mat2::from_slice(&[1, 2, 3, 4, 5, 6]),
            Matrix::from_rows([[1, 2], [3, 4]])
        );
    }

    #[test]
    fn diagonal() {
        let mat = Matrix::from_diagonal([1, 2]);

        #[rustfmt::skip]
        assert_eq!(mat, Matrix::from_rows([
            [1, 0],
            [0, 2],
        ]));

        assert_eq!(mat.into_diagonal(), [1, 2]);
    }

    #[test]
    fn fmt() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);

        // Natural writing order (row-wise) for debug output.
        assert_eq!(format!("{:?}", mat), "[[0, 1], [2, 3]]");

        // `#` modifier prints each row in its own line, but not each individual element.
        assert_eq!(
            format!("{:#?}", mat),
            "
[
    [0, 1],
    [2, 3],
]
"
            .trim()
        );

        assert_eq!(format!("{}", mat), "|0\t1|\n|2\t3|\n");
    }

    #[test]
    fn constants() {
        assert_eq!(format!("{:?}", Mat2f::ZERO), "[[0.0, 0.0], [0.0, 0.0]]");
        assert_eq!(format!("{:?}", Mat2f::IDENTITY), "[[1.0, 0.0], [0.0, 1.0]]");

        // The diagonal of non-square identities ends at the smaller dimension.
        assert_eq!(
            Matrix::<i32, 2, 3>::IDENTITY,
            Matrix::from_rows([[1, 0, 0], [0, 1, 0]])
        );
    }

    #[test]
    fn add_sub() {
        let a = Matrix::from_rows([[1, 2], [3, 4]]);
        let b = Matrix::from_rows([[5, 6], [7, 8]]);
        assert_eq!(a + b, Matrix::from_rows([[6, 8], [10, 12]]));
        assert_eq!(b - a, Matrix::splat(4));
        assert_eq!((a + b) - b, a);
        assert_eq!(-a, Matrix::from_rows([[-1, -2], [-3, -4]]));

        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn componentwise() {
        let a = Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::from_rows([[5.0, 6.0], [7.0, 8.0]]);
        assert_eq!(a.component_mul(b), Matrix::from_rows([[5.0, 12.0], [21.0, 32.0]]));
        assert_eq!(a.component_mul(b).component_div(b), a);
    }

    #[test]
    fn mat_vec_mul() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);
        let vec = vec2(4, 5);
        let out = mat * vec;
        assert_eq!(out, [4 * 0 + 5 * 1, 4 * 2 + 5 * 3]);
    }

    #[test]
    fn mat_mat_mul() {
        let a = Matrix::from_rows([[1, 2], [3, 4]]);
        let b = Matrix::from_rows([[5, 6], [7, 8]]);
        assert_eq!(a * b, Matrix::from_rows([[19, 22], [43, 50]]));
        assert_eq!(a * Mat2::IDENTITY, a);

        #[rustfmt::skip]
        let a = Matrix::from_rows([
            [1, 2],
            [3, 4],
            [5, 6],
            [7, 8],
        ]);
        #[rustfmt::skip]
        let b = Matrix::from_rows([
            [9, 10, 11],
            [12, 13, 14],
        ]);
        let c = a * b;
        assert_eq!(c[(0, 1)], a[(0, 0)] * b[(0, 1)] + a[(0, 1)] * b[(1, 1)]);
        assert_eq!(c[(2, 2)], a[(2, 0)] * b[(0, 2)] + a[(2, 1)] * b[(1, 2)]);
    }

    #[test]
    fn transpose_involution() {
        let mat = Matrix::from_rows([[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mat.transpose().transpose(), mat);
    }

    #[test]
    fn rows_and_columns() {
        let mat = Matrix::from_rows([[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mat.row(0), vec3(0, 1, 2));
        assert_eq!(mat.row(1), vec3(3, 4, 5));
        assert_eq!(mat.column(0), vec2(0, 3));
        assert_eq!(mat.column(2), vec2(2, 5));
    }

    #[test]
    fn submatrix() {
        let mat = Matrix::from_rows([[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(
            mat.submatrix::<2, 2>(1, 1),
            Matrix::from_rows([[4, 5], [7, 8]])
        );
        assert_eq!(mat.submatrix::<3, 3>(0, 0), mat);

        let mut copy = mat;
        copy.set_submatrix(0, 1, Matrix::from_rows([[9, 9], [9, 9]]));
        assert_eq!(copy, Matrix::from_rows([[0, 9, 9], [3, 9, 9], [6, 7, 8]]));
    }

    #[test]
    #[should_panic(expected = "sub-matrix extends past the matrix bounds")]
    fn submatrix_out_of_bounds() {
        let mat = Matrix::from_rows([[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        mat.submatrix::<2, 2>(2, 0);
    }

    #[test]
    fn determinant() {
        assert_eq!(Mat1f::ZERO.determinant(), 0.0);
        assert_eq!(Mat2f::ZERO.determinant(), 0.0);
        assert_eq!(Mat3f::ZERO.determinant(), 0.0);
        assert_eq!(Mat1f::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat2f::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat3f::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat4f::IDENTITY.determinant(), 1.0);
        assert_eq!(Matrix::<f32, 0, 0>::ZERO.determinant(), 1.0);

        assert_eq!(Matrix::from_rows([[1, 2], [3, 4]]).determinant(), -2);

        #[rustfmt::skip]
        let testmat = Matrix::from_rows([
            [-2, -1,  2],
            [ 2,  1,  4],
            [-3,  3, -1],
        ]);
        assert_eq!(testmat.determinant(), 54);
        assert_eq!(testmat.transpose().determinant(), 54);

        // A duplicated row makes the matrix singular.
        #[rustfmt::skip]
        let singular = Matrix::from_rows([
            [1, 2, 3],
            [4, 5, 6],
            [1, 2, 3],
        ]);
        assert_eq!(singular.determinant(), 0);
    }

    #[test]
    fn minors() {
        #[rustfmt::skip]
        let mat = Matrix::from_rows([
            [1, 2, 3],
            [4, 5, 6],
            [7, 8, 9],
        ]);
        assert_eq!(mat.determinant(), 0);
        assert_eq!(mat.minor::<2, 2>(0, 0), Matrix::from_rows([[5, 6], [8, 9]]));
        assert_eq!(mat.minor::<2, 2>(1, 1), Matrix::from_rows([[1, 3], [7, 9]]));

        #[rustfmt::skip]
        assert_eq!(mat.matrix_of_minors(), Matrix::from_rows([
            [-3,  -6, -3],
            [-6, -12, -6],
            [-3,  -6, -3],
        ]));
        assert_eq!(mat.matrix_of_minors()[(0, 0)], mat.minor::<2, 2>(0, 0).determinant());
    }

    #[test]
    fn invert() {
        let mat = Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let inv = mat.invert().unwrap();
        assert_eq!(inv, Matrix::from_rows([[-2.0, 1.0], [1.5, -0.5]]));
        assert_approx_eq!(inv * mat, Mat2::IDENTITY).abs(1e-5);
        assert_approx_eq!(mat * inv, Mat2::IDENTITY).abs(1e-5);

        assert_eq!(Mat3f::IDENTITY.invert(), Some(Mat3f::IDENTITY));

        // Singular matrices have no inverse.
        #[rustfmt::skip]
        let singular = Matrix::from_rows([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        assert_eq!(singular.determinant(), 0.0);
        assert_eq!(singular.invert(), None);
    }

    #[test]
    fn invert_random() {
        let mut rng = fastrand::Rng::with_seed(0x7265636f76657279);
        for _ in 0..50 {
            // Diagonally dominant matrices are far from singular.
            let mat = Matrix::<f64, 4, 4>::from_fn(|_, _| rng.f64() * 2.0 - 1.0)
                + Matrix::from_diagonal([8.0; 4]);
            let inv = mat.invert().unwrap();
            assert_approx_eq!(inv * mat, Mat4::IDENTITY, "{mat:?}").abs(1e-9);
        }
    }

    #[test]
    fn normalized() {
        let mat = Matrix::from_rows([[0.0, 3.0], [4.0, 0.0]]);
        assert_eq!(mat.frobenius_norm(), 5.0);
        let unit = mat.normalized().unwrap();
        assert_eq!(unit, Matrix::from_rows([[0.0, 0.6], [0.8, 0.0]]));
        assert_approx_eq!(unit.frobenius_norm(), 1.0);

        assert_eq!(Mat3f::ZERO.normalized(), None);
    }

    #[test]
    fn outer_product() {
        let mat = Matrix::outer(vec3(1, 2, 3), vec2(4, 5));
        #[rustfmt::skip]
        assert_eq!(mat, Matrix::from_rows([
            [ 4,  5],
            [ 8, 10],
            [12, 15],
        ]));
    }

    fn check_qr<const R: usize, const C: usize>(a: Matrix<f64, R, C>) {
        let (q, r) = a.qr();
        assert_approx_eq!(q * r, a, "Q * R should reconstruct the input").abs(1e-9);
        assert_approx_eq!(
            q.transpose() * q,
            Matrix::IDENTITY,
            "Q should be orthonormal"
        )
        .abs(1e-9);
        for i in 0..R {
            for j in 0..C.min(i) {
                assert_approx_eq!(r[(i, j)], 0.0, "R should be upper-triangular").abs(1e-9);
            }
        }
    }

    #[test]
    fn qr() {
        // Classic worked example.
        #[rustfmt::skip]
        let a = Matrix::from_rows([
            [12.0, -51.0,   4.0],
            [ 6.0, 167.0, -68.0],
            [-4.0,  24.0, -41.0],
        ]);
        check_qr(a);
        let (_, r) = a.qr();
        // The pivot magnitudes are fixed by the decomposition, up to sign.
        assert_approx_eq!(r[(0, 0)].abs(), 14.0).abs(1e-9);
        assert_approx_eq!(r[(1, 1)].abs(), 175.0).abs(1e-9);
        assert_approx_eq!(r[(2, 2)].abs(), 35.0).abs(1e-9);

        check_qr(Mat3::IDENTITY);
        check_qr(Mat3::ZERO);

        // Zero pivot column.
        #[rustfmt::skip]
        check_qr(Matrix::from_rows([
            [0.0, 1.0],
            [0.0, 2.0],
        ]));

        // Non-square shapes.
        check_qr(Matrix::<f64, 4, 2>::from_rows([
            [1.0, 2.0],
            [3.0, 4.0],
            [5.0, 6.0],
            [7.0, 8.0],
        ]));
        check_qr(Matrix::<f64, 2, 4>::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
        ]));
    }

    #[test]
    fn qr_random() {
        let mut rng = fastrand::Rng::with_seed(0x51522d74657374);
        for _ in 0..50 {
            check_qr(Matrix::<f64, 3, 3>::from_fn(|_, _| rng.f64() * 20.0 - 10.0));
            check_qr(Matrix::<f64, 5, 3>::from_fn(|_, _| rng.f64() * 20.0 - 10.0));
        }
    }

    #[test]
    fn checked_access() {
        let mut mat = Matrix::from_rows([[0, 1], [2, 3]]);
        assert_eq!(mat.get(1, 1), Some(&3));
        assert_eq!(mat.get(2, 0), None);
        assert_eq!(mat.get(0, 2), None);
        *mat.get_mut(1, 0).unwrap() = 9;
        assert_eq!(mat[(1, 0)], 9);
        assert_eq!(mat.get_mut(0, 2), None);
    }
}
