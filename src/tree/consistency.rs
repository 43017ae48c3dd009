//! Re-classifies the training examples with a finished tree.
use colored::Colorize;

use std::fmt;

use crate::Classifier;
use crate::sample::TrainingTable;
use super::dtree::DecisionTree;


const WIDTH: usize = 6;


/// The outcome of classifying every training example
/// with the tree built from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consistency {
    /// Number of examples checked.
    pub n_examples: usize,
    /// Number of examples whose own class was predicted.
    pub n_correct: usize,
    /// Row indices of the misclassified examples.
    pub mismatches: Vec<usize>,
}


impl Consistency {
    /// Returns `true` if every example is classified correctly.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }


    /// Returns the fraction of correctly classified examples.
    pub fn accuracy(&self) -> f64 {
        if self.n_examples == 0 { return 1.0; }
        self.n_correct as f64 / self.n_examples as f64
    }
}


impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_consistent() {
            format!("[{:^WIDTH$}]", "OK").bold().green()
        } else {
            format!("[{:^WIDTH$}]", "FAILED").bold().red()
        };
        write!(
            f,
            "{status} {} / {} training examples reproduced",
            format!("{:>WIDTH$}", self.n_correct).bold(),
            self.n_examples,
        )?;

        if !self.is_consistent() {
            write!(
                f, " ({} mismatches)", self.mismatches.len().to_string().yellow()
            )?;
        }
        Ok(())
    }
}


impl DecisionTree {
    /// Classifies every example of `table`
    /// and compares the result with its class.
    pub fn check(&self, table: &TrainingTable) -> Consistency {
        let mismatches = self.predict_all(table)
            .into_iter()
            .enumerate()
            .filter(|&(i, predicted)| predicted != table.class_of(i))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        let n_examples = table.len();
        let n_correct = n_examples - mismatches.len();
        if !mismatches.is_empty() {
            tracing::warn!(
                "{} of {n_examples} training examples are misclassified",
                mismatches.len()
            );
        }

        Consistency { n_examples, n_correct, mismatches }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        let report = Consistency {
            n_examples: 4,
            n_correct: 3,
            mismatches: vec![2],
        };
        assert!(!report.is_consistent());
        assert!((report.accuracy() - 0.75).abs() < 1e-12);

        let report = Consistency {
            n_examples: 0,
            n_correct: 0,
            mismatches: Vec::new(),
        };
        assert!(report.is_consistent());
        assert_eq!(report.accuracy(), 1.0);
    }

    #[test]
    fn test_display() {
        colored::control::set_override(false);
        let report = Consistency {
            n_examples: 4,
            n_correct: 3,
            mismatches: vec![2],
        };
        let line = report.to_string();
        assert!(line.contains("FAILED"), "got {line}");
        assert!(line.contains("3 / 4"), "got {line}");
        assert!(line.contains("(1 mismatches)"), "got {line}");
    }
}
