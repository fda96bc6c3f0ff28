use super::*;
use shared::{domain::Role, protocol::Cell};
use storage::{AvailabilityRecord, NewFaculty};

async fn setup() -> ApiContext {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    ApiContext { storage }
}

async fn add_faculty(ctx: &ApiContext, username: &str, first: &str, last: &str) -> UserId {
    ctx.storage
        .create_faculty(
            &NewFaculty {
                username,
                first_name: first,
                last_name: last,
                email: "staff@example.ac.uk",
                active: true,
                last_active: None,
            },
            &[Role::Faculty],
        )
        .await
        .expect("faculty")
}

#[tokio::test]
async fn empty_tables_produce_empty_payloads() {
    let ctx = setup().await;
    assert!(buildings_table(&ctx).await.expect("buildings").is_empty());
    assert!(rooms_table(&ctx).await.expect("rooms").is_empty());
    assert!(tags_table(&ctx).await.expect("tags").is_empty());
    assert!(tag_groups_table(&ctx).await.expect("groups").is_empty());
    assert!(faculty_table(&ctx).await.expect("faculty").is_empty());
    assert!(projects_table(&ctx, None).await.expect("projects").is_empty());
}

#[tokio::test]
async fn rooms_table_preserves_query_order() {
    let ctx = setup().await;
    let arts = ctx
        .storage
        .create_building("Arts", None, true)
        .await
        .expect("building");
    let pevensey = ctx
        .storage
        .create_building("Pevensey", None, false)
        .await
        .expect("building");
    for (building, name) in [(pevensey, "1A7"), (arts, "C175"), (arts, "A001")] {
        ctx.storage
            .create_room(building, name, 30, false, false)
            .await
            .expect("room");
    }

    let rows = rooms_table(&ctx).await.expect("rows");
    let names: Vec<String> = rows
        .iter()
        .map(|row| {
            row.get("name")
                .and_then(Cell::as_sortable)
                .expect("name")
                .display
                .clone()
        })
        .collect();
    assert_eq!(names, ["Arts A001", "Arts C175", "Pevensey 1A7"]);

    let pevensey_menu = rows[2]
        .get("menu")
        .and_then(Cell::as_markup)
        .expect("menu");
    assert!(pevensey_menu.as_str().contains("Building inactive"));
}

#[tokio::test]
async fn projects_table_filters_by_owner() {
    let ctx = setup().await;
    let jane = add_faculty(&ctx, "jdoe", "Jane", "Doe").await;
    let rick = add_faculty(&ctx, "rroe", "Rick", "Roe").await;
    ctx.storage
        .create_project(jane, None, "Halo shapes", true)
        .await
        .expect("project");
    ctx.storage
        .create_project(rick, None, "Lattice QCD", true)
        .await
        .expect("project");

    let all = projects_table(&ctx, None).await.expect("all");
    assert_eq!(all.len(), 2);

    let mine = projects_table(&ctx, Some(jane)).await.expect("mine");
    assert_eq!(mine.len(), 1);
    let owner = mine[0]
        .get("owner")
        .and_then(Cell::as_sortable)
        .expect("owner");
    assert_eq!(owner.sortkey, "DoeJane");

    let edit_link = |row: &RowRecord| {
        row.get("menu")
            .and_then(Cell::as_markup)
            .expect("menu")
            .as_str()
            .to_string()
    };
    assert!(edit_link(&mine[0]).contains("/faculty/edit_project/"));
    assert!(all.iter().all(|row| edit_link(row).contains("/convenor/edit_project/")));
}

#[tokio::test]
async fn assessors_table_requires_existing_assessment() {
    let ctx = setup().await;
    let err = assessors_table(&ctx, AssessmentId(99))
        .await
        .expect_err("should fail");
    assert!(matches!(err.code, ErrorCode::NotFound));
}

#[tokio::test]
async fn assessors_table_renders_with_assessment_context() {
    let ctx = setup().await;
    let assessment = ctx
        .storage
        .create_assessment("Year 4 talks", true, true, false)
        .await
        .expect("assessment");
    let jane = add_faculty(&ctx, "jdoe", "Jane", "Doe").await;
    ctx.storage
        .set_availability(assessment, jane, &AvailabilityRecord::default())
        .await
        .expect("availability");

    let rows = assessors_table(&ctx, assessment).await.expect("rows");
    assert_eq!(rows.len(), 1);
    let menu = rows[0].get("menu").and_then(Cell::as_markup).expect("menu");
    assert!(menu.as_str().contains("Availability closed"));
}

#[tokio::test]
async fn tag_without_group_does_not_fail_the_table() {
    let ctx = setup().await;
    ctx.storage
        .create_tag(None, "Loose", None, false)
        .await
        .expect("tag");

    let rows = tags_table(&ctx).await.expect("rows");
    assert_eq!(rows.len(), 1);
    let group = rows[0].get("group").and_then(Cell::as_markup).expect("group");
    assert!(group.as_str().contains("None"));
}
