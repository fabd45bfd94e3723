//! Student's two-sample t-test for independent samples.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Signed t statistic and two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    pub statistic: f64,
    pub pvalue: f64,
}

fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance)
}

/// Tests whether the means of `a` and `b` differ, assuming equal variances
/// (pooled variance, `n1 + n2 - 2` degrees of freedom).
///
/// A positive statistic means `a` has the larger mean.
///
/// Zero pooled variance has no t distribution to speak of: equal means give
/// a NaN statistic and p-value, different means an infinite statistic with
/// `p = 0`. Fewer than three values in total leave no degrees of freedom
/// and also yield NaN.
pub fn two_sample_ttest(a: &[f64], b: &[f64]) -> TTestResult {
    let nan = TTestResult {
        statistic: f64::NAN,
        pvalue: f64::NAN,
    };
    if a.is_empty() || b.is_empty() || a.len() + b.len() < 3 {
        return nan;
    }

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let (mean1, var1) = mean_and_variance(a);
    let (mean2, var2) = mean_and_variance(b);
    // A single-value sample contributes no variance term.
    let var1 = if a.len() > 1 { var1 } else { 0.0 };
    let var2 = if b.len() > 1 { var2 } else { 0.0 };

    let dof = n1 + n2 - 2.0;
    let pooled = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / dof;
    let std_err = (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
    let diff = mean1 - mean2;

    if std_err == 0.0 {
        if diff == 0.0 {
            return nan;
        }
        return TTestResult {
            statistic: diff.signum() * f64::INFINITY,
            pvalue: 0.0,
        };
    }

    let statistic = diff / std_err;
    match StudentsT::new(0.0, 1.0, dof) {
        Ok(dist) => TTestResult {
            statistic,
            pvalue: (2.0 * dist.sf(statistic.abs())).min(1.0),
        },
        Err(_) => nan,
    }
}
