//! Report routing by file extension
//!
//! The first image file goes to the imaging agent and the first non-image
//! file to the hematology agent. Further files of the same kind are not
//! routed; they share the evaluation of whichever agent ran for that kind.
//! A claim with two images is a known open limitation of this policy: only
//! the first is analyzed.

use std::path::Path;

use domain_claims::Report;
use domain_triage::AgentKind;

/// Extensions treated as imaging reports
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff"];

/// The agent kind a report routes to
pub type ReportKind = AgentKind;

/// Which report (by index) each agent analyzes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingPlan {
    /// Index of the first image report, if any
    pub imaging: Option<usize>,
    /// Index of the first non-image report, if any
    pub hematology: Option<usize>,
}

/// Classifies a report by its filename extension
pub fn kind_of(filename: &str) -> ReportKind {
    let is_image = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        });
    if is_image {
        AgentKind::Imaging
    } else {
        AgentKind::Hematology
    }
}

/// Picks the first report of each kind for analysis
pub fn route(reports: &[Report]) -> RoutingPlan {
    let mut plan = RoutingPlan::default();
    for (index, report) in reports.iter().enumerate() {
        match kind_of(&report.filename) {
            AgentKind::Imaging => {
                if plan.imaging.is_none() {
                    plan.imaging = Some(index);
                }
            }
            AgentKind::Hematology => {
                if plan.hematology.is_none() {
                    plan.hematology = Some(index);
                }
            }
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(filename: &str) -> Report {
        Report::new(filename, format!("/data/submissions/x/reports/{filename}"))
    }

    #[test]
    fn test_kind_by_extension() {
        assert_eq!(kind_of("scan.jpeg"), AgentKind::Imaging);
        assert_eq!(kind_of("scan.PNG"), AgentKind::Imaging);
        assert_eq!(kind_of("labs.txt"), AgentKind::Hematology);
        assert_eq!(kind_of("labs.pdf"), AgentKind::Hematology);
        assert_eq!(kind_of("no_extension"), AgentKind::Hematology);
    }

    #[test]
    fn test_route_picks_first_of_each_kind() {
        let reports = vec![
            report("labs.txt"),
            report("scan.jpeg"),
            report("second-labs.txt"),
            report("second-scan.png"),
        ];
        let plan = route(&reports);
        assert_eq!(plan.imaging, Some(1));
        assert_eq!(plan.hematology, Some(0));
    }

    #[test]
    fn test_route_single_kind() {
        let plan = route(&[report("scan.bmp")]);
        assert_eq!(plan.imaging, Some(0));
        assert_eq!(plan.hematology, None);
    }
}
