/// Concatenates supplied slices into one `Vec`.
#[macro_export]
macro_rules! concat_slices {
    ($($slice: expr),+) => {
        [$(&$slice[..]),+].concat()
    }
}

/// Calculates the product of pairing for supplied pairs.
/// ```compile_fail
/// multi_pairing! {
///     a, c;
///     b, d
/// }
/// ```
/// Will be transformed to:
/// ```compile_fail
/// E::multi_pairing([E::G1Prepared::from(a), E::G1Prepared::from(b)], [E::G2Prepared::from(c), E::G2Prepared::from(d)])
/// ```
#[macro_export]
macro_rules! multi_pairing {
    ($($g1: expr, $g2: expr);+) => {
        $crate::multi_pairing! { using E: $($g1, $g2);+ }
    };
    (using $pairing_engine: path: $($g1: expr, $g2: expr);+) => {
        <$pairing_engine as ark_ec::pairing::Pairing>::multi_pairing(
            [
                $(<$pairing_engine as ark_ec::pairing::Pairing>::G1Prepared::from($g1)),+
            ],
            [
                $(<$pairing_engine as ark_ec::pairing::Pairing>::G2Prepared::from($g2)),+
            ]
        )
    }
}

/// Flattened `rayon::join(|| expr1, || rayon::join(|| expr2, || ...))`
#[cfg(feature = "parallel")]
#[macro_export]
macro_rules! join {
    (@ $a: expr) => { $a };
    (@ $a: expr, $b: expr) => {
        rayon::join(|| $a, || $b)
    };
    (@ $a: expr, $b: expr, $($c: expr),+) => {{
        join!(@ $a, join!(@ $b, $($c),+))
    }};
    ($($e: expr),+) => {{
        $crate::unnest_tuple!(
            $($e),+
            =>
            join!(@ $($e),+)
        )
    }}
}

/// `(expr1, expr2, expr3...)`
#[cfg(not(feature = "parallel"))]
#[macro_export]
macro_rules! join {
    ($($e: expr),+) => {
        ($($e),+)
    };
}

/// `(a, (b, c)) => (a, b, c)`
#[macro_export]
macro_rules! unnest_tuple {
    ($a: expr => $v: expr) => {{
        $v
    }};
    ($a: expr, $b: expr => $v: expr) => {{
        let (_a, _b) = $v;

        (_a, _b)
    }};
    ($a: expr, $b: expr, $c: expr => $v: expr) => {{
        let (_a, (_b, _c)) = $v;

        (_a, _b, _c)
    }};
    ($a: expr, $b: expr, $c: expr, $d: expr => $v: expr) => {{
        let (_a, (_b, (_c, _d))) = $v;

        (_a, _b, _c, _d)
    }};
}

/// Returns `Err($error($left, $right))` from the enclosing function when `$left != $right`.
#[macro_export]
macro_rules! expect_equality {
    ($left: expr, $right: expr, $error: expr) => {
        if $left != $right {
            return Err($error($left, $right).into());
        }
    };
}
