// Presentation template selection
//
// Closed set of variants keyed by the profile's `designType`.

use crate::models::responses::ProfileRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Premium,
    Elite,
    Black,
    Sales,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Premium,
        Template::Elite,
        Template::Black,
        Template::Sales,
    ];

    /// Map a design type to its variant. Unknown or missing types fall back to `Premium`.
    /// Matching is exact (case-sensitive), as the backend sends it.
    pub fn for_design(design_type: Option<&str>) -> Self {
        match design_type {
            Some("premium") => Template::Premium,
            Some("elite") => Template::Elite,
            Some("black") => Template::Black,
            Some("SalesTemplate") => Template::Sales,
            _ => Template::Premium,
        }
    }

    pub fn design_type(&self) -> &'static str {
        match self {
            Template::Premium => "premium",
            Template::Elite => "elite",
            Template::Black => "black",
            Template::Sales => "SalesTemplate",
        }
    }
}

/// What every template receives.
#[derive(Debug, Clone, Copy)]
pub struct TemplateProps<'a> {
    pub template: Template,
    pub profile: &'a ProfileRecord,
    pub connect_disabled: bool,
}
