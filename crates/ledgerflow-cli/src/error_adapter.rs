//! Error adapter for converting LedgerflowError to miette diagnostics.
//!
//! This module bridges the library's error type and miette's report
//! formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! [`LedgerflowError::Unbalanced`] carries every node that fails the flow
//! balance check; each one is rendered as its own diagnostic.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use ledgerflow::{LedgerflowError, structure::Imbalance};

/// Adapter for a single flow imbalance.
pub struct ImbalanceAdapter<'a>(pub &'a Imbalance);

impl fmt::Debug for ImbalanceAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ImbalanceAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flow imbalance: {}", self.0)
    }
}

impl std::error::Error for ImbalanceAdapter<'_> {}

impl MietteDiagnostic for ImbalanceAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("ledgerflow::unbalanced"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!(
            "make the flows out of `{}` add up to the flows into it, \
             or set `validation.balance = \"warn\"` to render anyway",
            self.0.name()
        )))
    }
}

/// Adapter for [`LedgerflowError`] variants reported as a single diagnostic.
pub struct ErrorAdapter<'a>(pub &'a LedgerflowError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LedgerflowError::Io(_) => "ledgerflow::io",
            LedgerflowError::Graph(_) => "ledgerflow::graph",
            LedgerflowError::Color(_) => "ledgerflow::color",
            LedgerflowError::Unbalanced(_) => "ledgerflow::unbalanced",
            LedgerflowError::Layout(_) => "ledgerflow::layout",
            LedgerflowError::Export(_) => "ledgerflow::export",
            LedgerflowError::Config(_) => "ledgerflow::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            LedgerflowError::Config(_) => "check the TOML configuration file passed with --config",
            LedgerflowError::Color(_) => {
                "use CSS colors for [style] font_color and background_color, \
                 and six digit hex colors for [style.palette]"
            }
            LedgerflowError::Layout(_) => "increase [layout] width and height or reduce the margins",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// One node failing the flow balance check.
    Imbalance(ImbalanceAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Imbalance(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Imbalance(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Imbalance(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Imbalance(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`LedgerflowError`] into a list of reportable errors.
///
/// [`LedgerflowError::Unbalanced`] yields one [`Reportable`] per node; every
/// other variant yields a single [`Reportable`].
pub fn to_reportables(err: &LedgerflowError) -> Vec<Reportable<'_>> {
    match err {
        LedgerflowError::Unbalanced(imbalances) if !imbalances.is_empty() => imbalances
            .iter()
            .map(|imbalance| Reportable::Imbalance(ImbalanceAdapter(imbalance)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use ledgerflow::{ChartBuilder, config::AppConfig, figures::IncomeStatement};

    use super::*;

    fn unbalanced_error() -> LedgerflowError {
        let config: AppConfig = toml::from_str("[validation]\nbalance = \"deny\"\n").unwrap();
        ChartBuilder::new(config)
            .build_chart(&IncomeStatement::reference())
            .unwrap_err()
    }

    #[test]
    fn test_one_reportable_per_imbalance() {
        let err = unbalanced_error();
        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert!(reportables[0].to_string().contains("Operating Profit"));
        assert!(reportables[1].to_string().contains("Operating Expenses"));

        let code = reportables[0].code().unwrap().to_string();
        assert_eq!(code, "ledgerflow::unbalanced");
        let help = reportables[0].help().unwrap().to_string();
        assert!(help.contains("validation.balance"));
    }

    #[test]
    fn test_config_error() {
        let err = LedgerflowError::Config("bad value".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad value");
                assert_eq!(e.code().unwrap().to_string(), "ledgerflow::config");
                assert!(e.help().is_some());
            }
            Reportable::Imbalance(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_bad_font_color_is_reported_as_color_error() {
        let config: AppConfig = toml::from_str("[style]\nfont_color = \"nope\"\n").unwrap();
        let builder = ChartBuilder::new(config);
        let chart = builder.build_chart(&IncomeStatement::reference()).unwrap();
        let err = builder.render_svg(&chart).unwrap_err();

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].code().unwrap().to_string(), "ledgerflow::color");
        assert!(reportables[0].to_string().contains("nope"));
        let help = reportables[0].help().unwrap().to_string();
        assert!(help.contains("font_color"));
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = LedgerflowError::Io(std::io::Error::other("disk full"));
        let reportables = to_reportables(&err);

        assert_eq!(reportables[0].code().unwrap().to_string(), "ledgerflow::io");
        assert!(reportables[0].help().is_none());
    }
}
