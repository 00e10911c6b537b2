use crate::error::{GdError, Result};
use crate::Vector;

fn check_lengths(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(GdError::shape(
            format!("{} predictions", y_true.len()),
            format!("{} predictions", y_pred.len()),
        ));
    }
    if y_true.is_empty() {
        return Err(GdError::EmptyDataset);
    }
    Ok(())
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(|x| x * x).sum() / diff.len() as f64)
}

pub fn mean_absolute_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(|x| x.abs()).sum() / diff.len() as f64)
}

pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let y_mean = y_true.sum() / y_true.len() as f64;
    let ss_res = (y_true - y_pred).mapv(|x| x * x).sum();
    let ss_tot = y_true.mapv(|x| (x - y_mean) * (x - y_mean)).sum();

    if ss_tot == 0.0 {
        return Ok(1.0); // Perfect prediction when variance is zero
    }

    Ok(1.0 - ss_res / ss_tot)
}

/// Fraction of predictions equal to the label.
pub fn accuracy(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(actual, pred)| (*pred - *actual).abs() < 1e-10)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_mean_squared_error() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![1.0, 2.0, 5.0];

        let mse = mean_squared_error(&y_true, &y_pred).unwrap();
        assert_abs_diff_eq!(mse, 4.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_absolute_error() {
        let mae = mean_absolute_error(&array![1.0, 2.0], &array![0.0, 4.0]).unwrap();
        assert_abs_diff_eq!(mae, 1.5);
    }

    #[test]
    fn test_r2_score() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let y_pred = array![1.0, 2.0, 3.0, 4.0];

        let r2 = r2_score(&y_true, &y_pred).unwrap();
        assert_abs_diff_eq!(r2, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_accuracy() {
        let acc = accuracy(&array![0.0, 1.0, 1.0, 0.0], &array![0.0, 1.0, 0.0, 0.0]).unwrap();
        assert_abs_diff_eq!(acc, 0.75);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(mean_squared_error(&array![1.0], &array![1.0, 2.0]).is_err());
        assert!(matches!(
            r2_score(&Vector::zeros(0), &Vector::zeros(0)),
            Err(GdError::EmptyDataset)
        ));
    }
}
