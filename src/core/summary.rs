use std::{fmt::Display, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{core::FunctionKind, Float};

const WIDTH: usize = 78;

/// A struct that holds the results of a hybrid PSO/GA run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HybridSummary {
    /// The benchmark that was minimized.
    pub function: FunctionKind,
    /// The cut ratio of the genetic layer.
    pub cut_ratio: Float,
    /// The best value found.
    pub fx: Float,
    /// The position of the best value found.
    pub x: Vec<Float>,
    /// The (zero-based) iteration at which the global best last improved.
    pub gbest_iteration: usize,
    /// The number of iterations performed.
    pub iterations: usize,
    /// The wall-clock duration of the run.
    pub duration: Duration,
    /// The global-best value sampled every `record_interval` iterations as
    /// `(iteration, value)` pairs.
    pub history: Vec<(usize, Float)>,
    /// The number of objective evaluations.
    pub cost_evals: usize,
    /// A message that can be set by terminators.
    pub message: String,
    /// Whether a terminator flagged the run as converged.
    pub converged: bool,
}

fn rule(left: char, fill: char, right: char) -> String {
    format!(
        "{}{}{}",
        left,
        std::iter::repeat(fill).take(WIDTH).collect::<String>(),
        right
    )
}

impl Display for HybridSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lines = vec![
            rule('╒', '═', '╕'),
            format!("│{:^78}│", "HYBRID PSO/GA RESULTS"),
            rule('╞', '═', '╡'),
            format!(
                "│ Function: {:<30} Cut ratio: {:<25.3}│",
                self.function.to_string(),
                self.cut_ratio
            ),
            format!(
                "│ Status: {:<32} fval: {:<+30.8E}│",
                if self.converged {
                    "Converged"
                } else {
                    "Finished"
                },
                self.fx
            ),
            format!(
                "│ Iterations: {:<28} Last improvement: {:<18}│",
                self.iterations, self.gbest_iteration
            ),
            format!(
                "│ Evaluations: {:<27} Duration: {:<26}│",
                self.cost_evals,
                format!("{:.3?}", self.duration)
            ),
            rule('├', '─', '┤'),
            format!("│ Message: {:<68}│", self.message),
            rule('├', '─', '┤'),
            format!("│ {:>7} │ {:<67}│", "Par #", "Value"),
            rule('├', '─', '┤'),
        ];
        lines.extend(
            self.x
                .iter()
                .enumerate()
                .map(|(i, xi)| format!("│ {:>7} │ {:<+67.8E}│", i, xi)),
        );
        if !self.history.is_empty() {
            lines.push(rule('├', '─', '┤'));
            lines.push(format!("│ {:>7} │ {:<67}│", "Iter", "Global best"));
            lines.push(rule('├', '─', '┤'));
            lines.extend(
                self.history
                    .iter()
                    .map(|(i, fx)| format!("│ {:>7} │ {:<+67.8E}│", i, fx)),
            );
        }
        lines.push(rule('└', '─', '┘'));
        write!(f, "{}", lines.join("\n"))
    }
}
