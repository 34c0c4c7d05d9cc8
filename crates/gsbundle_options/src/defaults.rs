//! The built-in manifest for the 509 Dashboard project.
//!
//! Load order by level:
//! - Level 0: `Constants.gs` (no dependencies)
//! - Level 1: depends on Constants only
//! - Level 2: main setup and utilities
//! - Level 3: feature modules (depend on Constants, SecurityUtils, Code.gs)
//! - Tests: depend on Constants and TestConfig, loaded last

use super::Manifest;
use indexmap::IndexMap;

const CORE_MODULES: &[&str] = &[
    // Level 0
    "Constants.gs",
    // Level 1
    "SecurityUtils.gs",
    "HTMLTemplates.gs",
    "I18n.gs",
    "TestConfig.gs",
    // Level 2
    "Code.gs",
    "DataArchiving.gs",
    // Level 3
    "ADHDEnhancements.gs",
    "AdminGrievanceMessages.gs",
    "AuditLoggingRBAC.gs",
    "EnhancedADHDFeatures.gs",
    "AddRecommendations.gs",
    "AutomatedNotifications.gs",
    "AutomatedReports.gs",
    "BatchGrievanceRecalc.gs",
    "BatchOperations.gs",
    "CalendarIntegration.gs",
    "ColumnToggles.gs",
    "CustomReportBuilder.gs",
    "DarkModeThemes.gs",
    "DataBackupRecovery.gs",
    "DataCachingLayer.gs",
    "DataIntegrityEnhancements.gs",
    "DataPagination.gs",
    "DistributedLocks.gs",
    "EnhancedErrorHandling.gs",
    "FAQKnowledgeBase.gs",
    "GettingStartedAndFAQ.gs",
    "GmailIntegration.gs",
    "GoogleDriveIntegration.gs",
    "GracefulDegradation.gs",
    "GrievanceFloatToggle.gs",
    "GrievanceWorkflow.gs",
    "IdempotentOperations.gs",
    "IncrementalBackupSystem.gs",
    "InteractiveDashboard.gs",
    "KeyboardShortcuts.gs",
    "LazyLoadCharts.gs",
    "MemberDirectoryDropdowns.gs",
    "MemberDirectoryGoogleFormLink.gs",
    "MemberSearch.gs",
    "MobileOptimization.gs",
    "OptimizedDashboardRebuild.gs",
    "PerformanceAndBackup.gs",
    "PerformanceMonitoring.gs",
    "Phase6Integration.gs",
    "PredictiveAnalytics.gs",
    "ReorganizedMenu.gs",
    "RootCauseAnalysis.gs",
    "SecurityAndAdmin.gs",
    "SecurityService.gs",
    "SeedNuke.gs",
    "SmartAutoAssignment.gs",
    "TransactionRollback.gs",
    "UIFeatures.gs",
    "UndoRedoSystem.gs",
    "UnifiedOperationsMonitor.gs",
    "UtilityService.gs",
    "WorkflowStateMachine.gs",
];

const TEST_MODULES: &[&str] = &[
    "TestFramework.gs",
    "Code.test.gs",
    "Integration.test.gs",
];

const DEPENDENCIES: &[(&str, &[&str])] = &[
    ("SecurityUtils.gs", &["Constants.gs"]),
    ("HTMLTemplates.gs", &["Constants.gs"]),
    ("I18n.gs", &["Constants.gs"]),
    ("TestConfig.gs", &["Constants.gs"]),
    ("Code.gs", &["Constants.gs", "SecurityUtils.gs"]),
    ("DataArchiving.gs", &["Constants.gs", "SecurityUtils.gs", "HTMLTemplates.gs"]),
    ("TestFramework.gs", &["Constants.gs", "TestConfig.gs"]),
    ("Code.test.gs", &["TestFramework.gs", "Code.gs"]),
    ("Integration.test.gs", &["TestFramework.gs"]),
];

const TRACKED_SYMBOLS: &[&str] = &[
    "SHEETS",
    "COLORS",
    "MEMBER_COLS",
    "GRIEVANCE_COLS",
    "SECURITY_ROLES",
    "ADMIN_EMAILS",
    "ROLES",
    "GRIEVANCE_TIMELINES",
    "GRIEVANCE_STATUSES",
    "GRIEVANCE_STEPS",
    "ISSUE_CATEGORIES",
    "CONFIG_COLS",
    "CACHE_CONFIG",
    "CACHE_KEYS",
    "ERROR_CONFIG",
    "ERROR_CATEGORIES",
    "UI_CONFIG",
    "EMAIL_CONFIG",
    "PERFORMANCE_CONFIG",
    "FEATURE_FLAGS",
    "VERSION_INFO",
    "RATE_LIMITS",
    "AUDIT_LOG_SHEET",
];

const EXCLUDED_FILES: &[&str] = &[
    "ConsolidatedDashboard.gs",
    "Complete509Dashboard.gs",
    "build.js",
    "fix_destructuring.js",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn dashboard_manifest() -> Manifest {
    let dependencies: IndexMap<String, Vec<String>> = DEPENDENCIES
        .iter()
        .map(|(unit, deps)| (unit.to_string(), strings(deps)))
        .collect();

    Manifest {
        title: "509 DASHBOARD".to_string(),
        version: "2.0.0".to_string(),
        output: "ConsolidatedDashboard.gs".to_string(),
        core_modules: strings(CORE_MODULES),
        test_modules: strings(TEST_MODULES),
        dependencies,
        tracked_symbols: strings(TRACKED_SYMBOLS),
        excluded_files: strings(EXCLUDED_FILES),
    }
}
