//! Easing functions.
//!
//! Every easing maps 0 to 0 and 1 to 1. Any `fn(f32) -> f32` with that property can be used.

/// An easing function.
pub type Easing = fn(f32) -> f32;

pub fn linear(t: f32) -> f32 {
    t
}

/// Quadratic ease-in.
pub fn ease_in(t: f32) -> f32 {
    t * t
}

/// Quadratic ease-out.
pub fn ease_out(t: f32) -> f32 {
    t * (2. - t)
}

/// Quadratic ease-in-out.
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2. * t * t
    } else {
        -1. + (4. - 2. * t) * t
    }
}

/// Smooth ease-out cubic
pub fn ease_out_cubic(t: f32) -> f32 {
    1. - (1. - t).powi(3)
}

/// Even smoother ease-out quartic
pub fn ease_out_quart(t: f32) -> f32 {
    1. - (1. - t).powi(4)
}

/// Bounces against the end value, like a dropped ball.
pub fn bounce(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;

    if t < 1. / D {
        N * t * t
    } else if t < 2. / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [(&str, Easing); 7] = [
        ("linear", linear),
        ("ease_in", ease_in),
        ("ease_out", ease_out),
        ("ease_in_out", ease_in_out),
        ("ease_out_cubic", ease_out_cubic),
        ("ease_out_quart", ease_out_quart),
        ("bounce", bounce),
    ];

    #[test]
    fn endpoints_are_fixed() {
        for (name, easing) in ALL.iter() {
            assert!(easing(0.).abs() < 1e-5, "{} at 0", name);
            assert!((easing(1.) - 1.).abs() < 1e-5, "{} at 1", name);
        }
    }

    #[test]
    fn quadratic_easings_are_monotonic() {
        for easing in [ease_in as Easing, ease_out, ease_in_out, ease_out_cubic] {
            let mut previous = 0.;
            for i in 1..=100 {
                let value = easing(i as f32 / 100.);
                assert!(value >= previous);
                previous = value;
            }
        }
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out(0.25) + ease_in_out(0.75) - 1.).abs() < 1e-6);
    }
}
