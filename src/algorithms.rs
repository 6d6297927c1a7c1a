/// Finds the index of the last value in a sorted slice which is less than or equal to the test
/// value, clamped to the valid range of indices.
pub fn preceding_index_search(slice: &[f64], test_value: f64) -> usize {
    if slice.len() <= 1 || slice[1] > test_value {
        return 0;
    }

    let mut a = 1;
    let mut b = slice.len() - 1;
    if slice[b] <= test_value {
        return b;
    }

    while b > a + 1 {
        let check = (a + b) / 2;
        if test_value >= slice[check] {
            a = check;
        } else {
            b = check;
        }
    }
    a
}

/// Piecewise linear interpolation of `ys` over the sorted abscissae `xs`. Returns `None` when the
/// test value lies outside of `xs` or there are fewer than two samples.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    if xs.len() < 2 || xs.len() != ys.len() || x < xs[0] || x > xs[xs.len() - 1] {
        return None;
    }

    let i = preceding_index_search(xs, x).min(xs.len() - 2);
    let span = xs[i + 1] - xs[i];
    if span <= 0.0 {
        return Some(ys[i]);
    }
    let f = (x - xs[i]) / span;
    Some(ys[i] * (1.0 - f) + ys[i + 1] * f)
}
