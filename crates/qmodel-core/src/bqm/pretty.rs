//! Human-readable quadratic model summary.

use std::fmt;

use qmodel_labels::Label;

use super::BinaryQuadraticModel;
use crate::pretty::{PREVIEW_TERMS, format_terms};

impl<L: Label> fmt::Display for BinaryQuadraticModel<L> {
    /// Header line with the model's shape, then a preview of the objective.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "BinaryQuadraticModel({}, {} variables, {} interactions, {})",
            self.vartype,
            self.num_variables(),
            self.num_interactions(),
            self.backing().as_str()
        )?;
        let mut terms = Vec::with_capacity(self.num_variables() + self.num_interactions());
        for (position, label) in self.index.iter() {
            terms.push((vec![format!("{label:?}")], self.store.linear(position)));
        }
        self.store.for_each_quadratic(|u, v, bias| {
            if let (Some(lu), Some(lv)) = (self.index.label_of(u), self.index.label_of(v)) {
                terms.push((vec![format!("{lu:?}"), format!("{lv:?}")], bias));
            }
        });
        write!(
            f,
            "  {}",
            format_terms(terms, self.offset(), PREVIEW_TERMS)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::BinaryQuadraticModel;
    use crate::types::{Backing, Vartype};

    #[test]
    fn display_lists_terms() {
        let model = BinaryQuadraticModel::new(
            [(0_i64, 1.0), (1, -2.0)],
            [((0, 1), -1.0)],
            0.5,
            Vartype::Spin,
            Backing::Sparse,
        )
        .unwrap();
        assert_eq!(
            model.to_string(),
            "BinaryQuadraticModel(SPIN, 2 variables, 1 interactions, sparse)\n  0 - 2 1 - 0*1 + 0.5"
        );
    }
}
