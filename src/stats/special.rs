//! Special functions behind the Student-t critical value.
//!
//! Only what [`student_t_ppf`] needs: log-gamma, the regularized incomplete
//! beta function, and its inverse.

use std::f64::consts::PI;

use crate::error::{Error, Result};

const MAX_CF_ITER: usize = 10_000;
const MAX_NEWTON_ITER: usize = 64;
const FPMIN: f64 = f64::MIN_POSITIVE / f64::EPSILON;

/// Lanczos approximation of ln Γ(x) for x > 0 (g = 7, n = 9).
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection: Γ(x) = π / (sin(πx) · Γ(1-x))
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    let z = x - 1.0;
    let mut ag = COEFFICIENTS[0];
    for (i, c) in COEFFICIENTS.iter().enumerate().skip(1) {
        ag += c / (z + i as f64);
    }
    let t = z + 7.5;
    0.5 * (2.0 * PI).ln() + (z + 0.5) * t.ln() - t + ag.ln()
}

/// Continued fraction for the incomplete beta function (modified Lentz).
fn beta_cf(a: f64, b: f64, x: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_CF_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step.
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        // Odd step.
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;
        if (del - 1.0).abs() <= f64::EPSILON {
            break;
        }
    }
    h
}

/// Regularized incomplete beta function I_x(a, b) for a, b > 0 and x in [0, 1].
pub fn beta_inc(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_cf(a, b, x) / a
    } else {
        1.0 - front * beta_cf(b, a, 1.0 - x) / b
    }
}

/// Inverse of [`beta_inc`] in `x`: returns x with I_x(a, b) = p.
///
/// Initial guess from Numerical Recipes (3rd ed., §6.4), refined with Halley steps.
pub fn beta_inc_inv(a: f64, b: f64, p: f64) -> f64 {
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }

    let a1 = a - 1.0;
    let b1 = b - 1.0;
    let mut x = if a >= 1.0 && b >= 1.0 {
        let pp = if p < 0.5 { p } else { 1.0 - p };
        let t = (-2.0 * pp.ln()).sqrt();
        let mut x = (2.30753 + t * 0.27061) / (1.0 + t * (0.99229 + t * 0.04481)) - t;
        if p < 0.5 {
            x = -x;
        }
        let al = (x * x - 3.0) / 6.0;
        let h = 2.0 / (1.0 / (2.0 * a - 1.0) + 1.0 / (2.0 * b - 1.0));
        let w = (x * (al + h).sqrt() / h)
            - (1.0 / (2.0 * b - 1.0) - 1.0 / (2.0 * a - 1.0)) * (al + 5.0 / 6.0 - 2.0 / (3.0 * h));
        a / (a + b * (2.0 * w).exp())
    } else {
        let lna = (a / (a + b)).ln();
        let lnb = (b / (a + b)).ln();
        let t = (a * lna).exp() / a;
        let u = (b * lnb).exp() / b;
        let w = t + u;
        if p < t / w {
            (a * w * p).powf(1.0 / a)
        } else {
            1.0 - (b * w * (1.0 - p)).powf(1.0 / b)
        }
    };

    let afac = -ln_gamma(a) - ln_gamma(b) + ln_gamma(a + b);
    for j in 0..MAX_NEWTON_ITER {
        if x == 0.0 || x == 1.0 {
            return x;
        }
        let err = beta_inc(a, b, x) - p;
        let density = (a1 * x.ln() + b1 * (1.0 - x).ln() + afac).exp();
        let u = err / density;
        let step = u / (1.0 - 0.5 * f64::min(1.0, u * (a1 / x - b1 / (1.0 - x))));
        x -= step;
        if x <= 0.0 {
            x = 0.5 * (x + step);
        }
        if x >= 1.0 {
            x = 0.5 * (x + step + 1.0);
        }
        if step.abs() < 1e-14 * x && j > 0 {
            break;
        }
    }
    x
}

/// Quantile (inverse CDF) of Student's t distribution with `nu` degrees of freedom.
///
/// Uses the identity `CDF(t) = 1 - ½·I_{ν/(ν+t²)}(ν/2, ½)` for `t > 0`.
pub fn student_t_ppf(p: f64, nu: f64) -> Result<f64> {
    if !(nu > 0.0 && nu.is_finite()) {
        return Err(Error::InvalidParameter {
            name: "nu",
            message: "degrees of freedom must be positive and finite",
        });
    }
    if !(p > 0.0 && p < 1.0) {
        return Err(Error::InvalidParameter {
            name: "p",
            message: "probability must lie strictly between 0 and 1",
        });
    }
    if p == 0.5 {
        return Ok(0.0);
    }

    let (q, sign) = if p > 0.5 {
        (2.0 * (1.0 - p), 1.0)
    } else {
        (2.0 * p, -1.0)
    };
    let x = beta_inc_inv(nu / 2.0, 0.5, q);
    Ok(sign * (nu * (1.0 / x - 1.0)).sqrt())
}
