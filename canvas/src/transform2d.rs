use std::f64;
use std::ops::{Mul};

///
/// Represents a 2D affine transformation matrix
///
/// The coefficients are stored in the order `[a, b, c, d, e, f]`, mapping a point such that
/// `x' = a*x + c*y + e` and `y' = b*x + d*y + f`.
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Transform2D(pub [f64; 6]);

impl Default for Transform2D {
    fn default() -> Transform2D {
        Transform2D::identity()
    }
}

impl Transform2D {
    ///
    /// Applies this transformation to a point, returning the transformed point
    ///
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        let Transform2D(ref m) = self;

        (
            m[0]*x + m[2]*y + m[4],
            m[1]*x + m[3]*y + m[5]
        )
    }

    ///
    /// Applies the linear part of this transformation to a vector (ignoring the translation)
    ///
    pub fn transform_vector(&self, dx: f64, dy: f64) -> (f64, f64) {
        let Transform2D(ref m) = self;

        (
            m[0]*dx + m[2]*dy,
            m[1]*dx + m[3]*dy
        )
    }

    ///
    /// Creates the identity transform
    ///
    pub fn identity() -> Transform2D {
        Transform2D([1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
    }

    ///
    /// Creates a translation transformation
    ///
    pub fn translate(x: f64, y: f64) -> Transform2D {
        Transform2D([1.0, 0.0, 0.0, 1.0, x, y])
    }

    ///
    /// Creates a scaling transformation
    ///
    pub fn scale(scale_x: f64, scale_y: f64) -> Transform2D {
        Transform2D([scale_x, 0.0, 0.0, scale_y, 0.0, 0.0])
    }

    ///
    /// Creates a counterclockwise rotation transformation
    ///
    pub fn rotate(radians: f64) -> Transform2D {
        let cos = f64::cos(radians);
        let sin = f64::sin(radians);

        Transform2D([cos, sin, -sin, cos, 0.0, 0.0])
    }

    ///
    /// Creates a counterclockwise rotation transformation from an angle in degrees
    ///
    pub fn rotate_degrees(degrees: f64) -> Transform2D {
        Self::rotate(degrees / 180.0 * f64::consts::PI)
    }

    ///
    /// Returns the transformation that applies this transform followed by another one
    ///
    pub fn compose(&self, then: &Transform2D) -> Transform2D {
        let Transform2D(ref s) = self;
        let Transform2D(ref o) = then;

        Transform2D([
            o[0]*s[0] + o[2]*s[1],
            o[1]*s[0] + o[3]*s[1],
            o[0]*s[2] + o[2]*s[3],
            o[1]*s[2] + o[3]*s[3],
            o[0]*s[4] + o[2]*s[5] + o[4],
            o[1]*s[4] + o[3]*s[5] + o[5]
        ])
    }

    ///
    /// The determinant of the linear part of this transform
    ///
    pub fn determinant(&self) -> f64 {
        let Transform2D(ref m) = self;

        m[0]*m[3] - m[1]*m[2]
    }

    ///
    /// Returns an inverted Transform2D
    ///
    pub fn invert(&self) -> Option<Transform2D> {
        let Transform2D(ref m) = self;
        let det = self.determinant();

        if det != 0.0 && det.is_finite() {
            let inv_det = 1.0/det;

            Some(Transform2D([
                m[3] * inv_det,
                -m[1] * inv_det,
                -m[2] * inv_det,
                m[0] * inv_det,
                (m[2]*m[5] - m[3]*m[4]) * inv_det,
                (m[1]*m[4] - m[0]*m[5]) * inv_det
            ]))
        } else {
            None
        }
    }

    ///
    /// True if this transform preserves angles (a rotation and a uniform scale, possibly with a reflection)
    ///
    /// Circular arcs stay circular under a conformal transform, so they can be passed through to a
    /// device as arcs.
    ///
    pub fn is_conformal(&self) -> bool {
        let Transform2D(ref m) = self;
        let tolerance = 1e-9 * (m[0].abs() + m[1].abs() + m[2].abs() + m[3].abs()).max(1e-300);

        let rotation    = (m[0]-m[3]).abs() <= tolerance && (m[1]+m[2]).abs() <= tolerance;
        let reflection  = (m[0]+m[3]).abs() <= tolerance && (m[1]-m[2]).abs() <= tolerance;

        (rotation || reflection) && self.determinant() != 0.0
    }

    ///
    /// True if this transform maps the x and y axes onto themselves (no rotation or skew)
    ///
    pub fn preserves_axes(&self) -> bool {
        let Transform2D(ref m) = self;

        m[1] == 0.0 && m[2] == 0.0
    }

    ///
    /// Returns the largest and smallest factors by which this transform stretches a vector
    ///
    pub fn singular_values(&self) -> (f64, f64) {
        let Transform2D(ref m) = self;

        let half_sum    = (m[0]*m[0] + m[1]*m[1] + m[2]*m[2] + m[3]*m[3]) / 2.0;
        let det         = self.determinant();
        let root        = (half_sum*half_sum - det*det).max(0.0).sqrt();

        ((half_sum + root).sqrt(), (half_sum - root).max(0.0).sqrt())
    }

    ///
    /// True if two transforms are equal to within a tolerance
    ///
    pub fn approx_eq(&self, other: &Transform2D, tolerance: f64) -> bool {
        let Transform2D(ref a) = self;
        let Transform2D(ref b) = other;

        a.iter().zip(b.iter()).all(|(a, b)| (a-b).abs() <= tolerance)
    }
}

///
/// Multiplication follows matrix order: `a * b` applies `b` first and then `a`
///
impl Mul<Transform2D> for Transform2D {
    type Output=Transform2D;

    fn mul(self, other: Transform2D) -> Transform2D {
        other.compose(&self)
    }
}

impl Mul<&Transform2D> for &Transform2D {
    type Output=Transform2D;

    fn mul(self, other: &Transform2D) -> Transform2D {
        other.compose(self)
    }
}
