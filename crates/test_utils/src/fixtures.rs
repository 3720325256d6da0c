//! Canned report texts for tests

/// All three markers clearly elevated; the primary rule alone decides `true`
pub const POSITIVE_HEMATOLOGY_REPORT: &str = "\
HEMATOLOGY REPORT
Patient: 58-year-old male, productive cough and fever for three days
WBC Count: 13.5 x10^9/L
C-reactive protein (CRP): 60.0 mg/L
Neutrophils: 80 %
Platelets: 210 x10^9/L
";

/// Every marker within normal bounds; the primary rule alone decides `false`
pub const NORMAL_HEMATOLOGY_REPORT: &str = "\
HEMATOLOGY REPORT
Patient: 34-year-old female, routine follow-up
WBC Count: 6.0 x10^9/L
C-reactive protein (CRP): 3.0 mg/L
Neutrophils: 50 %
Platelets: 250 x10^9/L
";

/// One elevated marker and a mid-range CRP; the primary rule is uncertain
pub const BORDERLINE_HEMATOLOGY_REPORT: &str = "\
HEMATOLOGY REPORT
Patient: 61-year-old male, dry cough, afebrile at examination
WBC Count: 12.1 x10^9/L
C-reactive protein (CRP): 30.0 mg/L
Neutrophils: 60 %
";

/// Decimal-comma locale variant of a borderline report
pub const DECIMAL_COMMA_HEMATOLOGY_REPORT: &str = "\
HEMATOLOGY REPORT
WBC Count: 12,8
C-reactive protein (CRP): 33,5 mg/L
Neutrophils: 71,2 %
";

/// Free-text narrative without any extractable laboratory values
pub const NARRATIVE_ONLY_REPORT: &str = "\
Clinical note: patient reports fatigue and intermittent cough.
No laboratory panel was performed at this visit.
";
