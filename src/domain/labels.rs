// Presentation-facing label table.
//
// Status codes map 1:1 to a small fixed label/color table consumed by the
// dashboards. Colors are severity tags, not style values.

use regex::Regex;

use super::application::ApplicationStatus;
use super::document::DocumentStatus;

/// Human-readable label plus severity color for one status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLabel {
    pub label: &'static str,
    pub color: &'static str,
}

/// Label table for application statuses
pub fn application_label(status: ApplicationStatus) -> StatusLabel {
    match status {
        ApplicationStatus::Pending => StatusLabel { label: "Pending", color: "warning" },
        ApplicationStatus::Approved => StatusLabel { label: "Approved", color: "success" },
        ApplicationStatus::Rejected => StatusLabel { label: "Rejected", color: "error" },
        ApplicationStatus::RenewalPending => StatusLabel { label: "Renewal Pending", color: "warning" },
        ApplicationStatus::Active => StatusLabel { label: "Active", color: "success" },
    }
}

/// Label table for the derived document statuses
pub fn document_label(status: DocumentStatus) -> StatusLabel {
    match status {
        DocumentStatus::Pending => StatusLabel { label: "Pending", color: "warning" },
        DocumentStatus::Approved => StatusLabel { label: "Approved", color: "success" },
        DocumentStatus::Completed => StatusLabel { label: "Completed", color: "info" },
        DocumentStatus::Rejected => StatusLabel { label: "Rejected", color: "error" },
        DocumentStatus::RenewalPending => StatusLabel { label: "Renewal Pending", color: "warning" },
    }
}

/// Humanize a license tag: "street_vendor" -> "Street Vendor"
pub fn format_license_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let spaced = name.replace('_', " ");
    let word_start = Regex::new(r"\b[a-z]").expect("static pattern");
    word_start
        .replace_all(&spaced, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_table() {
        assert_eq!(application_label(ApplicationStatus::Pending).label, "Pending");
        assert_eq!(application_label(ApplicationStatus::Pending).color, "warning");
        assert_eq!(application_label(ApplicationStatus::Approved).color, "success");
        assert_eq!(application_label(ApplicationStatus::Rejected).color, "error");
    }

    #[test]
    fn test_format_license_name() {
        assert_eq!(format_license_name("street_vendor"), "Street Vendor");
        assert_eq!(format_license_name("health_permit"), "Health Permit");
        assert_eq!(format_license_name(""), "");
    }
}
