use super::*;

#[test]
fn escape_neutralises_html_metacharacters() {
    assert_eq!(
        escape(r#"<b>"O'Brien" & co</b>"#),
        "&lt;b&gt;&quot;O&#x27;Brien&quot; &amp; co&lt;/b&gt;"
    );
}

#[test]
fn status_badges_are_distinct() {
    assert_ne!(StatusBadge::Active.render(), StatusBadge::Inactive.render());
    assert!(StatusBadge::from_active(true).render().as_str().contains("Active"));
    assert!(StatusBadge::from_active(false).render().as_str().contains("Inactive"));
}

#[test]
fn missing_group_renders_none_badge() {
    assert!(GroupBadge::None.render().as_str().contains(">None<"));
}

#[test]
fn group_name_is_escaped() {
    let markup = GroupBadge::Named {
        name: "<script>",
        active: true,
    }
    .render();
    assert!(!markup.as_str().contains("<script>"));
    assert!(markup.as_str().contains("&lt;script&gt;"));
}

#[test]
fn disabled_action_has_no_href() {
    let menu = ActionMenu::new(vec![
        MenuAction::link("Edit details...", "pencil-alt", "/admin/edit_room/1".into()),
        MenuAction::disabled("Building inactive"),
    ]);
    let html = menu.render().into_string();
    assert!(html.contains(r#"href="/admin/edit_room/1""#));
    assert!(html.contains(r#"disabled"><i class="fas fa-ban fa-fw"></i> Building inactive</a>"#));
}

#[test]
fn empty_role_list_renders_none() {
    assert!(role_badges(&[]).as_str().contains("None"));
    let html = role_badges(&[Role::Admin, Role::Faculty]).into_string();
    assert!(html.contains(">admin<"));
    assert!(html.contains(">faculty<"));
}

#[test]
fn mailto_escapes_display_and_address() {
    let html = mailto("Jane <Doe>", "jane@example.ac.uk");
    assert_eq!(
        html,
        r#"<a class="text-decoration-none" href="mailto:jane@example.ac.uk">Jane &lt;Doe&gt;</a>"#
    );
}

#[test]
fn coloured_label_is_markup_and_mutes_inactive() {
    let live = coloured_label("TPP", Some("#aa3300"), false);
    assert!(live.as_str().contains("background-color: #aa3300;"));
    let muted = coloured_label("TPP", Some("#aa3300"), true);
    assert_eq!(muted.as_str(), r#"<span class="badge bg-secondary">TPP</span>"#);
}

#[test]
fn none_badge_matches_missing_group_badge() {
    assert_eq!(none_badge(), GroupBadge::None.render());
    assert_eq!(colour_swatch(None), none_badge());
}
