//! Human-readable polynomial model summary.

use std::fmt;

use qmodel_labels::Label;

use super::BinaryPolynomialModel;
use crate::pretty::{PREVIEW_TERMS, format_terms};

impl<L: Label> fmt::Display for BinaryPolynomialModel<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "BinaryPolynomialModel({}, {} variables, {} interactions, degree {})",
            self.vartype,
            self.num_variables(),
            self.num_interactions(),
            self.degree()
        )?;
        let terms = self
            .terms
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, bias)| {
                let factors = self
                    .labels_of(key)
                    .iter()
                    .map(|label| format!("{label:?}"))
                    .collect::<Vec<String>>();
                (factors, *bias)
            });
        write!(f, "  {}", format_terms(terms, self.offset(), PREVIEW_TERMS))
    }
}
