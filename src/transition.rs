//! Curvature blending profiles shared by the horizontal and cant
//! transition-curve families.
//!
//! Every transition type ramps a quantity (horizontal curvature or cant)
//! from its start value to its end value along the segment. The ramp is
//! described by a dimensionless blending factor `f(t)` over normalized
//! distance `t = u / length`, with `f(0) = 0` and `f(1) = 1`. Headings are
//! integrals of curvature, so each profile also carries the closed-form
//! antiderivative `F(t)` of its blending factor.

/// Blending profile of a transition curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransitionShape {
    /// Linear ramp (clothoid family).
    Linear,
    /// Cubic ramp in arc length.
    Cubic,
    /// Piecewise-quadratic ramp (Schramm curve).
    Helmert,
    /// Degree-3 polynomial ramp with zero end slopes.
    Bloss,
    /// Half-wave cosine ramp.
    Cosine,
    /// Full-wave sine-corrected ramp (Klein curve).
    Sine,
    /// Degree-7 polynomial ramp with zero end slopes up to third order.
    Viennese,
}

impl TransitionShape {
    /// Blending factor `f(t)` for `t` in `[0, 1]`.
    pub fn blend(self, t: f64) -> f64 {
        match self {
            TransitionShape::Linear => t,
            TransitionShape::Cubic => t.powi(3),
            TransitionShape::Helmert => {
                if t <= 0.5 {
                    2.0 * t * t
                } else {
                    4.0 * t - 2.0 * t * t - 1.0
                }
            }
            TransitionShape::Bloss => (3.0 - 2.0 * t) * t * t,
            TransitionShape::Cosine => 0.5 * (1.0 - (std::f64::consts::PI * t).cos()),
            TransitionShape::Sine => {
                t - (std::f64::consts::TAU * t).sin() / std::f64::consts::TAU
            }
            TransitionShape::Viennese => {
                (35.0 + t * (-84.0 + t * (70.0 - 20.0 * t))) * t.powi(4)
            }
        }
    }

    /// Antiderivative `F(t)` of [`TransitionShape::blend`] with `F(0) = 0`.
    pub fn blend_integral(self, t: f64) -> f64 {
        match self {
            TransitionShape::Linear => 0.5 * t * t,
            TransitionShape::Cubic => 0.25 * t.powi(4),
            TransitionShape::Helmert => {
                if t <= 0.5 {
                    2.0 / 3.0 * t.powi(3)
                } else {
                    1.0 / 6.0 - t + 2.0 * t * t - 2.0 / 3.0 * t.powi(3)
                }
            }
            TransitionShape::Bloss => (1.0 - 0.5 * t) * t.powi(3),
            TransitionShape::Cosine => {
                0.5 * (t - (std::f64::consts::PI * t).sin() / std::f64::consts::PI)
            }
            TransitionShape::Sine => {
                let tau = std::f64::consts::TAU;
                0.5 * t * t + ((tau * t).cos() - 1.0) / (tau * tau)
            }
            TransitionShape::Viennese => {
                (7.0 + t * (-14.0 + t * (10.0 - 2.5 * t))) * t.powi(5)
            }
        }
    }
}

/// Composite Simpson quadrature of `f` over `[a, b]`.
///
/// `panels` is rounded up to the next even count.
pub(crate) fn integrate(f: impl Fn(f64) -> f64, a: f64, b: f64, panels: usize) -> f64 {
    let n = (panels + panels % 2).max(2);
    let h = (b - a) / n as f64;
    let mut sum = f(a) + f(b);
    for i in 1..n {
        let w = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += w * f(a + i as f64 * h);
    }
    sum * h / 3.0
}
