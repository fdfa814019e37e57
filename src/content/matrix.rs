//! Affine transformation matrices.
//!
//! PDF places glyphs through two matrices: the current transformation matrix
//! (CTM) set by `cm`, and the text matrix set by the text positioning
//! operators. Both use the row-vector convention, so composing `m` then `n`
//! means `m × n`.

use crate::geometry::Point;

/// A 2D transformation matrix.
///
/// PDF uses matrices of the form:
/// ```text
/// [ a  b  0 ]
/// [ c  d  0 ]
/// [ e  f  1 ]
/// ```
///
/// Where (a,b,c,d) define scaling/rotation/skewing and (e,f) define translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// Horizontal scaling component
    pub a: f64,
    /// Rotation/skew component
    pub b: f64,
    /// Rotation/skew component
    pub c: f64,
    /// Vertical scaling component
    pub d: f64,
    /// Horizontal translation
    pub e: f64,
    /// Vertical translation
    pub f: f64,
}

impl Matrix {
    /// Create a matrix from its six components.
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Create an identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_textflow::content::Matrix;
    ///
    /// let m = Matrix::identity();
    /// assert_eq!(m.a, 1.0);
    /// assert_eq!(m.d, 1.0);
    /// assert_eq!(m.e, 0.0);
    /// ```
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Create a translation matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_textflow::content::Matrix;
    ///
    /// let m = Matrix::translation(10.0, 20.0);
    /// assert_eq!(m.e, 10.0);
    /// assert_eq!(m.f, 20.0);
    /// ```
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Create a scaling matrix.
    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Create a counter-clockwise rotation by `degrees`.
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Compose two transforms: apply `self` first, then `other`.
    ///
    /// Matrix multiplication is not commutative, so
    /// `a.then(&b) != b.then(&a)` in general.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_textflow::content::Matrix;
    ///
    /// let m = Matrix::translation(10.0, 0.0).then(&Matrix::scaling(2.0, 2.0));
    /// let p = m.transform_point(5.0, 0.0);
    /// assert_eq!(p.x, 30.0);
    /// ```
    pub fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Transform a point using this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_textflow::content::Matrix;
    ///
    /// let m = Matrix::translation(10.0, 20.0);
    /// let p = m.transform_point(5.0, 10.0);
    /// assert_eq!(p.x, 15.0);
    /// assert_eq!(p.y, 30.0);
    /// ```
    pub fn transform_point(&self, x: f64, y: f64) -> Point {
        Point {
            x: self.a * x + self.c * y + self.e,
            y: self.b * x + self.d * y + self.f,
        }
    }

    /// Effective scale used to turn a font size into a device-space height.
    ///
    /// `sqrt(|a·d| + |b·c|)`; equals the uniform scale for any rotation of
    /// a uniformly scaled matrix.
    pub fn scale_factor(&self) -> f64 {
        ((self.a * self.d).abs() + (self.b * self.c).abs()).sqrt()
    }

    /// Get the determinant of this matrix.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(x, y)| (x - y).abs() <= tolerance)
    }

    /// The six components in PDF operand order.
    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f64; 6]> for Matrix {
    fn from([a, b, c, d, e, f]: [f64; 6]) -> Self {
        Self::new(a, b, c, d, e, f)
    }
}

/// Compose `m` then `n` (`m × n`).
pub fn compose(m: &Matrix, n: &Matrix) -> Matrix {
    m.then(n)
}

/// Map `point` through `m`.
pub fn apply(point: Point, m: &Matrix) -> Point {
    m.transform_point(point.x, point.y)
}
