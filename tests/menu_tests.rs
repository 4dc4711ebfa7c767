//! Integration tests for menu projection and rendering

use std::fs;
use std::rc::Rc;

use campus_nav::core::catalog::{self, roles};
use campus_nav::core::navigation::CommandTarget;
use campus_nav::{
    MenuFormat, MenuProjector, NavigationService, NavigationStack, RegistryBuilder, RoleSet,
    RouteDeclaration, ViewType,
};
use tempfile::TempDir;

fn group_names(projection: &campus_nav::MenuProjection) -> Vec<&str> {
    projection
        .groups
        .iter()
        .map(|group| group.name.as_str())
        .collect()
}

#[test]
fn test_groups_follow_min_member_order() {
    let mut builder = RegistryBuilder::new();
    builder
        .declare_raw(
            ViewType::new("ProfileViewModel"),
            RouteDeclaration::new("profile").order(10).group("System"),
        )
        .declare_raw(
            ViewType::new("HomeViewModel"),
            RouteDeclaration::new("home").order(1).group("Main"),
        )
        .declare_raw(
            ViewType::new("HelpViewModel"),
            RouteDeclaration::new("help").order(5),
        );
    let registry = builder.build().expect("unique paths");

    let menu = MenuProjector::new(&registry).project_menu(&RoleSet::anonymous());
    assert_eq!(group_names(&menu), vec!["Main", "General", "System"]);
    assert_eq!(menu.paths(), vec!["home", "help", "profile"]);
}

#[test]
fn test_non_ascii_group_names_merge() {
    let mut builder = RegistryBuilder::new();
    builder
        .declare_raw(
            ViewType::new("ExamListViewModel"),
            RouteDeclaration::new("exams").order(1).group("Prüfungen"),
        )
        .declare_raw(
            ViewType::new("ExamResultsViewModel"),
            RouteDeclaration::new("exams/results").order(2).group("PRÜFUNGEN"),
        );
    let registry = builder.build().expect("unique paths");

    let menu = MenuProjector::new(&registry).project_menu(&RoleSet::anonymous());
    assert_eq!(group_names(&menu), vec!["Prüfungen"]);
    assert_eq!(menu.group("prüfungen").map(|group| group.items.len()), Some(2));
    assert_eq!(
        registry
            .get_routes_by_group("prüfungen", &RoleSet::anonymous())
            .len(),
        2
    );
}

#[test]
fn test_catalog_menu_for_each_role() {
    let (registry, _) = catalog::discover().expect("catalog has unique paths");
    let projector = MenuProjector::new(&registry);

    let anonymous = projector.project_menu(&RoleSet::anonymous());
    assert_eq!(
        group_names(&anonymous),
        vec!["Main", "Academics", "Resources", "System"]
    );
    assert!(!anonymous.paths().contains(&"dashboard"));
    assert!(!anonymous.paths().contains(&"login"));

    let admin = projector.project_menu(&RoleSet::parse(roles::SYSTEM_ADMIN));
    let system = admin.group("system").expect("system group");
    let names: Vec<&str> = system
        .items
        .iter()
        .map(|item| item.display_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Profile", "Settings", "User Administration", "Audit Log"]
    );
    let user_admin = &system.items[2];
    assert!(user_admin.requires_confirmation);
    assert!(user_admin.has_children);
}

#[test]
fn test_projection_is_recomputed_per_role_set() {
    let (registry, _) = catalog::discover().expect("catalog has unique paths");
    let projector = MenuProjector::new(&registry);

    let before = projector.project_menu(&RoleSet::anonymous());
    let after_login = projector.project_menu(&RoleSet::parse("Teacher"));
    let after_logout = projector.project_menu(&RoleSet::anonymous());

    assert!(after_login.item_count() > before.item_count());
    assert_eq!(before.paths(), after_logout.paths());
    assert_eq!(registry.len(), catalog::discover().expect("unique").0.len());
}

#[test]
fn test_submenu_children() {
    let (registry, _) = catalog::discover().expect("catalog has unique paths");
    let projector = MenuProjector::new(&registry);

    let children = projector.children("grades", &RoleSet::parse(roles::TEACHER));
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].path, "grades/reports");
    assert!(children[0].is_beta);

    assert!(projector
        .children("grades", &RoleSet::parse(roles::STUDENT))
        .is_empty());
}

#[test]
fn test_menu_items_drive_navigation() {
    let (registry, views) = catalog::discover().expect("catalog has unique paths");
    let registry = Rc::new(registry);
    let service = NavigationService::new(Rc::clone(&registry), Rc::new(views));
    service
        .initialize(NavigationStack::new())
        .expect("initializes");

    let menu = MenuProjector::new(&registry).project_menu(&RoleSet::parse(roles::STUDENT));
    for item in menu.groups.iter().flat_map(|group| &group.items) {
        assert_eq!(item.command.target(), &CommandTarget::Path(item.path.clone()));
        assert!(item.command.can_execute(&service));
        item.command.execute(&service).expect("menu routes resolve");
    }

    assert_eq!(service.depth(), menu.item_count());
    assert_eq!(
        service.breadcrumbs(),
        menu.paths()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_render_and_export_markdown() {
    let (registry, _) = catalog::discover().expect("catalog has unique paths");
    let teacher = RoleSet::parse(roles::TEACHER);
    let menu = MenuProjector::new(&registry).project_menu(&teacher);

    let markdown = menu.render(MenuFormat::Markdown, &teacher);
    assert!(markdown.starts_with("# Menu (teacher)"));
    assert!(markdown.contains("## Academics"));
    assert!(markdown.contains("| Grade Report | `grades/reports` | - | beta |"));

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir
        .path()
        .join(format!("teacher.{}", MenuFormat::Markdown.extension()));
    fs::write(&path, &markdown).expect("Failed to write menu");
    assert_eq!(fs::read_to_string(&path).expect("readable"), markdown);
}

#[test]
fn test_render_text_lists_every_item() {
    let (registry, _) = catalog::discover().expect("catalog has unique paths");
    let roles = RoleSet::parse("Student");
    let menu = MenuProjector::new(&registry).project_menu(&roles);

    let text = menu.render(MenuFormat::Text, &roles);
    for path in menu.paths() {
        assert!(text.contains(&format!("/{path}")), "missing {path}");
    }
    assert!(text.contains("[Ctrl+N]"));
}
