use std::fmt;

/// One optimal assignment: the objective value plus a value per decision
/// variable, index-aligned to the objective coefficients.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub objective_value: f64,
    pub variable_values: Vec<f64>,
}

impl Solution {
    pub fn new(objective_value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            objective_value,
            variable_values,
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objective Value: {}", self.objective_value)?;
        write!(f, "Variable Values: ")?;
        for (i, value) in self.variable_values.iter().enumerate() {
            write!(f, "x{}={} ", i + 1, value)?;
        }
        Ok(())
    }
}

/// Append-only log of the solutions produced over a model session. Nothing
/// is deduplicated; each successful solve adds one entry in call order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionSet {
    solutions: Vec<Solution>,
}

impl SolutionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_solution(&mut self, objective_value: f64, variable_values: Vec<f64>) {
        self.solutions
            .push(Solution::new(objective_value, variable_values));
    }

    pub fn clear(&mut self) {
        self.solutions.clear();
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Solution> {
        self.solutions.iter()
    }
}

impl fmt::Display for SolutionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.solutions.is_empty() {
            return write!(f, "No solutions found.");
        }
        for (i, solution) in self.solutions.iter().enumerate() {
            writeln!(f, "Solution {}:", i + 1)?;
            writeln!(f, "{}", solution)?;
        }
        Ok(())
    }
}
