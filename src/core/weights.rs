use crate::error::{ChartError, ChartResult};

/// Computes normalized fractional bar-group widths.
///
/// Without a weight pattern every group receives `1/N`. With a pattern,
/// group `i` receives `pattern[i] / sum(pattern[0..N])`. The pattern must
/// cover at least `group_count` entries.
pub fn group_weights(group_count: usize, pattern: Option<&[u32]>) -> ChartResult<Vec<f64>> {
    if group_count == 0 {
        return Ok(Vec::new());
    }

    let Some(pattern) = pattern else {
        let weight = 1.0 / group_count as f64;
        return Ok(vec![weight; group_count]);
    };

    if group_count > pattern.len() {
        return Err(ChartError::InvalidConfig(format!(
            "weight pattern has {} entries but {} bar groups require weights",
            pattern.len(),
            group_count
        )));
    }

    let total: u32 = pattern[..group_count].iter().sum();
    if total == 0 {
        return Err(ChartError::InvalidConfig(
            "weight pattern must not sum to zero".to_owned(),
        ));
    }

    Ok(pattern[..group_count]
        .iter()
        .map(|&entry| f64::from(entry) / f64::from(total))
        .collect())
}

/// Running prefix sums of weights: entry `i` is the total weight of groups
/// before group `i`. Used as the "previous cumulative weight" geometry input.
#[must_use]
pub fn cumulative_weights(weights: &[f64]) -> Vec<f64> {
    let mut previous = Vec::with_capacity(weights.len());
    let mut sum = 0.0;
    for weight in weights {
        previous.push(sum);
        sum += weight;
    }
    previous
}
