//! Views of the campus management application
//!
//! Every screen declares its route here and is registered with both the
//! route registry and the view-model lookup table in a single pass. The view
//! models only carry their title; data access lives in the CRUD services.

use crate::core::error::RegistryError;
use crate::core::navigation::{ViewModel, ViewTable};
use crate::core::routing::{
    RegistryBuilder, RouteDeclaration, RouteRegistry, RouteSource, Routable, ViewType,
};

/// Role names used by the catalog
pub mod roles {
    /// Enrolled student
    pub const STUDENT: &str = "Student";
    /// Teaching staff
    pub const TEACHER: &str = "Teacher";
    /// Librarian
    pub const LIBRARIAN: &str = "Librarian";
    /// Full administrative access
    pub const SYSTEM_ADMIN: &str = "SystemAdmin";
}

use roles::{LIBRARIAN, STUDENT, SYSTEM_ADMIN, TEACHER};

macro_rules! campus_view {
    ($(#[$meta:meta])* $name:ident, $title:literal) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name;

        impl ViewModel for $name {
            fn view_type(&self) -> ViewType {
                <Self as Routable>::VIEW_TYPE
            }

            fn title(&self) -> &str {
                $title
            }
        }
    };
}

campus_view!(
    /// Sign-in screen
    LoginViewModel, "Sign in"
);
campus_view!(
    /// Landing page
    HomeViewModel, "Home"
);
campus_view!(
    /// Staff dashboard
    DashboardViewModel, "Dashboard"
);
campus_view!(
    /// Student roster
    StudentListViewModel, "Students"
);
campus_view!(
    /// Single student record
    StudentDetailsViewModel, "Student details"
);
campus_view!(
    /// Course catalog
    CourseListViewModel, "Courses"
);
campus_view!(
    /// Grade book
    GradeBookViewModel, "Grades"
);
campus_view!(
    /// Grade statistics reports
    GradeReportViewModel, "Grade reports"
);
campus_view!(
    /// Library loans and catalog
    LibraryViewModel, "Library"
);
campus_view!(
    /// Notification inbox
    NotificationListViewModel, "Notifications"
);
campus_view!(
    /// Own profile
    ProfileViewModel, "Profile"
);
campus_view!(
    /// Application settings
    SettingsViewModel, "Settings"
);
campus_view!(
    /// User and role management
    UserAdminViewModel, "User administration"
);
campus_view!(
    /// Audit trail
    AuditLogViewModel, "Audit log"
);

impl Routable for LoginViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("LoginViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("login").display_name("Sign In").hidden()
    }
}

impl Routable for HomeViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("HomeViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("home")
            .order(1)
            .group("Main")
            .icon("home")
            .shortcut("Ctrl+H")
            .description("Start page")
    }
}

impl Routable for DashboardViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("DashboardViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("dashboard")
            .order(2)
            .group("Main")
            .icon("dashboard")
            .role(TEACHER)
            .role(SYSTEM_ADMIN)
    }
}

impl Routable for StudentListViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("StudentListViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("students")
            .display_name("Students")
            .order(10)
            .group("Academics")
            .icon("people")
            .role(TEACHER)
            .role(SYSTEM_ADMIN)
            .tag("people")
            .tag("academics")
    }
}

impl Routable for StudentDetailsViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("StudentDetailsViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("students/details")
            .parent("students")
            .role(TEACHER)
            .role(SYSTEM_ADMIN)
            .tag("people")
            .hidden()
    }
}

impl Routable for CourseListViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("CourseListViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("courses")
            .display_name("Courses")
            .order(11)
            .group("Academics")
            .icon("book-open")
            .tag("academics")
    }
}

impl Routable for GradeBookViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("GradeBookViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("grades")
            .display_name("Grades")
            .order(12)
            .group("Academics")
            .icon("grade")
            .role(STUDENT)
            .role(TEACHER)
            .tag("academics")
    }
}

impl Routable for GradeReportViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("GradeReportViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("grades/reports")
            .order(13)
            .group("Academics")
            .parent("grades")
            .icon("chart")
            .role(TEACHER)
            .tag("academics")
            .tag("reports")
            .beta()
    }
}

impl Routable for LibraryViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("LibraryViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("library")
            .order(20)
            .group("Resources")
            .icon("library")
            .tag("resources")
    }
}

impl Routable for NotificationListViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("NotificationListViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("notifications")
            .display_name("Notifications")
            .order(21)
            .group("Resources")
            .icon("bell")
            .shortcut("Ctrl+N")
    }
}

impl Routable for ProfileViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("ProfileViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("profile")
            .order(90)
            .group("System")
            .icon("user")
    }
}

impl Routable for SettingsViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("SettingsViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("settings")
            .order(91)
            .group("System")
            .icon("gear")
            .shortcut("Ctrl+,")
    }
}

impl Routable for UserAdminViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("UserAdminViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("admin")
            .display_name("User Administration")
            .order(95)
            .group("System")
            .icon("shield")
            .role(SYSTEM_ADMIN)
            .tag("security")
            .confirm()
    }
}

impl Routable for AuditLogViewModel {
    const VIEW_TYPE: ViewType = ViewType::new("AuditLogViewModel");

    fn route() -> RouteDeclaration {
        RouteDeclaration::new("admin/audit")
            .order(96)
            .group("System")
            .parent("admin")
            .icon("list")
            .role(SYSTEM_ADMIN)
            .role(LIBRARIAN)
            .tag("security")
    }
}

/// Registers a view with both the route list and the constructor table
fn declare<T>(builder: &mut RegistryBuilder, table: &mut ViewTable)
where
    T: Routable + ViewModel + Default + 'static,
{
    builder.declare::<T>();
    table.register::<T>();
}

/// Screens available to every signed-in user
pub struct CoreViews;

impl RouteSource for CoreViews {
    fn name(&self) -> &str {
        "core"
    }

    fn declare(&self, builder: &mut RegistryBuilder, views: &mut ViewTable) {
        declare::<LoginViewModel>(builder, views);
        declare::<HomeViewModel>(builder, views);
        declare::<DashboardViewModel>(builder, views);
        declare::<ProfileViewModel>(builder, views);
        declare::<SettingsViewModel>(builder, views);
        declare::<NotificationListViewModel>(builder, views);
    }
}

/// Students, courses, grades and library
pub struct AcademicViews;

impl RouteSource for AcademicViews {
    fn name(&self) -> &str {
        "academics"
    }

    fn declare(&self, builder: &mut RegistryBuilder, views: &mut ViewTable) {
        declare::<StudentListViewModel>(builder, views);
        declare::<StudentDetailsViewModel>(builder, views);
        declare::<CourseListViewModel>(builder, views);
        declare::<GradeBookViewModel>(builder, views);
        declare::<GradeReportViewModel>(builder, views);
        declare::<LibraryViewModel>(builder, views);
    }
}

/// Administration screens
pub struct AdminViews;

impl RouteSource for AdminViews {
    fn name(&self) -> &str {
        "admin"
    }

    fn declare(&self, builder: &mut RegistryBuilder, views: &mut ViewTable) {
        declare::<UserAdminViewModel>(builder, views);
        declare::<AuditLogViewModel>(builder, views);
    }
}

/// Feature areas in registration order
pub const AREAS: [&dyn RouteSource; 3] = [&CoreViews, &AcademicViews, &AdminViews];

/// Build the route registry and the matching constructor table in one pass
///
/// # Errors
/// Returns a [`RegistryError`] if two catalog views claim the same path.
pub fn discover() -> Result<(RouteRegistry, ViewTable), RegistryError> {
    RouteRegistry::discover(&AREAS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_has_a_constructor() {
        let (registry, table) = discover().unwrap();
        assert_eq!(registry.len(), table.len());
        for route in registry.routes() {
            assert!(table.contains(route.view_type()), "{}", route.view_type());
        }
    }

    #[test]
    fn test_view_models_report_their_type() {
        let vm = GradeReportViewModel;
        assert_eq!(vm.view_type(), GradeReportViewModel::VIEW_TYPE);
        assert_eq!(vm.title(), "Grade reports");
    }

    #[test]
    fn test_derived_display_names() {
        let (registry, _) = discover().unwrap();
        let audit = registry.get_by_path("admin/audit").unwrap();
        assert_eq!(audit.display_name(), "Audit Log");
        let details = registry.get_by_type(StudentDetailsViewModel::VIEW_TYPE).unwrap();
        assert_eq!(details.display_name(), "Student Details");
    }

    #[test]
    fn test_areas_extend_registry_and_table_together() {
        let mut builder = RegistryBuilder::new();
        let mut views = ViewTable::new();
        builder.extend(&AdminViews, &mut views);
        assert_eq!(builder.len(), 2);
        assert!(views.contains(UserAdminViewModel::VIEW_TYPE));
        assert!(views.contains(AuditLogViewModel::VIEW_TYPE));

        let names: Vec<&str> = AREAS.iter().map(|area| area.name()).collect();
        assert_eq!(names, vec!["core", "academics", "admin"]);
    }
}
