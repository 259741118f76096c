use crate::model::{Direction, LpModel, Relation};

/// Dense simplex tableau: objective row 0, one row per constraint, one
/// slack/surplus column per constraint, RHS in the last column. Dimensions
/// are fixed at construction and never change during pivoting.
///
/// The internal form always maximizes. Row 0 holds the negated maximization
/// coefficients, so a `Minimize` objective is stored un-negated (maximizing
/// its negation) and its value is flipped back on extraction.
#[derive(Debug, Clone)]
pub(crate) struct Tableau {
    cells: Vec<Vec<f64>>,
    num_variables: usize,
}

impl Tableau {
    /// Builds the initial tableau for a validated model. No artificial
    /// variables are introduced for `>=` or `=` rows, so the starting basis
    /// is only guaranteed feasible when every constraint is `<=` with a
    /// non-negative constant.
    pub(crate) fn from_model(model: &LpModel) -> Self {
        let n = model.num_variables();
        let m = model.num_constraints();
        let cols = n + m + 1;

        let mut cells = vec![vec![0.0; cols]; m + 1];

        for (j, &coefficient) in model.objective.coefficients.iter().enumerate() {
            cells[0][j] = match model.objective.direction {
                Direction::Maximize => -coefficient,
                Direction::Minimize => coefficient,
            };
        }

        for (i, constraint) in model.constraints.iter().enumerate() {
            let row = &mut cells[i + 1];
            row[..n].copy_from_slice(&constraint.coefficients);
            // Strict relations are normalized away at construction; a raw
            // Lt/Gt slipping through gets the matching non-strict column.
            row[n + i] = match constraint.relation {
                Relation::Le | Relation::Lt => 1.0,
                Relation::Ge | Relation::Gt => -1.0,
                Relation::Eq => 0.0,
            };
            row[cols - 1] = constraint.constant;
        }

        Self {
            cells,
            num_variables: n,
        }
    }

    pub(crate) fn rows(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn cols(&self) -> usize {
        self.cells[0].len()
    }

    pub(crate) fn rhs_col(&self) -> usize {
        self.cols() - 1
    }

    pub(crate) fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }

    /// Scales the pivot row so the pivot element becomes 1, then eliminates
    /// the pivot column from every other row (Gauss-Jordan step).
    pub(crate) fn pivot(&mut self, pivot_row: usize, pivot_col: usize) {
        let cols = self.cols();
        let pivot_value = self.cells[pivot_row][pivot_col];
        for j in 0..cols {
            self.cells[pivot_row][j] /= pivot_value;
        }

        for i in 0..self.rows() {
            if i == pivot_row {
                continue;
            }
            let factor = self.cells[i][pivot_col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..cols {
                self.cells[i][j] -= factor * self.cells[pivot_row][j];
            }
        }
    }

    /// If the column is a unit basis vector (a single entry of 1, every
    /// other row 0), returns the row holding the 1.
    pub(crate) fn basic_row(&self, col: usize, tolerance: f64) -> Option<usize> {
        let mut unit_row = None;
        for i in 0..self.rows() {
            let value = self.cells[i][col];
            if (value - 1.0).abs() <= tolerance {
                if unit_row.is_some() {
                    return None;
                }
                unit_row = Some(i);
            } else if value.abs() > tolerance {
                return None;
            }
        }
        unit_row
    }
}
