/// Arithmetic mean of the given minute values; `None` for an empty input.
pub fn mean_minutes<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = i64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0_i128, 0_u64), |(sum, count), value| (sum + i128::from(value), count + 1));

    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}
