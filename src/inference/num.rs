use crate::ir::Prim;

/// Inclusive bounds of Go's 32-bit `int` range as used for narrowing.
pub const INT32_MIN: f64 = i32::MIN as f64;
pub const INT32_MAX: f64 = i32::MAX as f64;

/// Integral numbers narrow to `Int32` when they fit, else `Int64`; anything
/// with a fractional part (or not finite) is `Float64`.
pub fn classify(n: f64) -> Prim {
    if !n.is_finite() || n.fract() != 0.0 {
        return Prim::Float64;
    }
    if (INT32_MIN..=INT32_MAX).contains(&n) {
        Prim::Int32
    } else {
        Prim::Int64
    }
}

/// Float wins over int; every other disagreement is `Unknown`.
pub fn reconcile_prim(a: Prim, b: Prim) -> Prim {
    match (a, b) {
        _ if a == b => a,
        (Prim::Float64, x) | (x, Prim::Float64) if x.is_int() => Prim::Float64,
        _ => Prim::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int32_boundaries_are_inclusive() {
        assert_eq!(classify(2147483647.0), Prim::Int32);
        assert_eq!(classify(-2147483648.0), Prim::Int32);
        assert_eq!(classify(2147483648.0), Prim::Int64);
        assert_eq!(classify(-2147483649.0), Prim::Int64);
    }

    #[test]
    fn fractional_and_non_finite_are_float() {
        assert_eq!(classify(0.5), Prim::Float64);
        assert_eq!(classify(-3.25), Prim::Float64);
        assert_eq!(classify(f64::NAN), Prim::Float64);
        assert_eq!(classify(f64::INFINITY), Prim::Float64);
        // integral float literal still counts as integer
        assert_eq!(classify(1.0), Prim::Int32);
        assert_eq!(classify(1e12), Prim::Int64);
    }

    #[test]
    fn reconcile_is_commutative() {
        use Prim::*;
        let all = [Bool, String, Timestamp, Int32, Int64, Float64, Unknown];
        for a in all {
            for b in all {
                assert_eq!(reconcile_prim(a, b), reconcile_prim(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn reconcile_rules() {
        use Prim::*;
        assert_eq!(reconcile_prim(Int32, Float64), Float64);
        assert_eq!(reconcile_prim(Float64, Int64), Float64);
        assert_eq!(reconcile_prim(Int32, Int32), Int32);
        assert_eq!(reconcile_prim(Int32, Int64), Unknown);
        assert_eq!(reconcile_prim(Float64, Unknown), Unknown);
        assert_eq!(reconcile_prim(String, Timestamp), Unknown);
        assert_eq!(reconcile_prim(Bool, Int32), Unknown);
    }
}
