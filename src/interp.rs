use crate::types::Value;

// Linear interpolation
pub fn lerp(a: Value, b: Value, t: Value) -> Value {
    a + (b - a) * t
}

// Return the interpolation factor t of `v` inside `[v0, v1]`, computed in f64 so
// endpoints near f32::MAX do not overflow
pub fn find_t(v0: Value, v1: Value, v: Value) -> Value {
    ((f64::from(v) - f64::from(v0)) / (f64::from(v1) - f64::from(v0))) as Value
}

// Linearly interpolate between two colors by factor t
pub fn lerp_rgba(c0: [Value; 4], c1: [Value; 4], t: Value) -> [Value; 4] {
    std::array::from_fn(|i| lerp(c0[i], c1[i], t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_t_inverts_lerp() {
        let v = lerp(2.0, 6.0, 0.25);
        assert_eq!(v, 3.0);
        assert_eq!(find_t(2.0, 6.0, v), 0.25);
    }

    #[test]
    fn find_t_spans_the_whole_f32_range() {
        assert_eq!(find_t(-Value::MAX, Value::MAX, -Value::MAX), 0.0);
        assert_eq!(find_t(-Value::MAX, Value::MAX, 0.0), 0.5);
        assert_eq!(find_t(-Value::MAX, Value::MAX, Value::MAX), 1.0);
    }

    #[test]
    fn lerp_rgba_blends_every_channel() {
        let c = lerp_rgba([0.0, 0.0, 0.0, 1.0], [1.0, 0.5, 0.0, 1.0], 0.5);
        assert_eq!(c, [0.5, 0.25, 0.0, 1.0]);
    }
}
