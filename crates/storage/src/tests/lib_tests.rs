use super::*;

fn faculty<'a>(username: &'a str, first_name: &'a str, last_name: &'a str) -> NewFaculty<'a> {
    NewFaculty {
        username,
        first_name,
        last_name,
        email: "staff@example.ac.uk",
        active: true,
        last_active: None,
    }
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("allocation_storage_test_{suffix}"));
    let db_path = temp_root.join("nested").join("storage.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

#[tokio::test]
async fn rooms_carry_their_building() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let building = storage
        .create_building("Pevensey", Some("#aa0000"), false)
        .await
        .expect("building");
    storage
        .create_room(building, "1A7", 120, true, false)
        .await
        .expect("room");

    let rooms = storage.list_rooms().await.expect("rooms");
    assert_eq!(rooms.len(), 1);
    let building = rooms[0].building.as_ref().expect("building loaded");
    assert_eq!(building.name, "Pevensey");
    assert!(!building.active);
    assert_eq!(rooms[0].capacity, 120);
    assert_eq!(rooms[0].available(), Some(false));
}

#[tokio::test]
async fn room_toggle_is_visible_on_next_read() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let building = storage
        .create_building("Chichester", None, true)
        .await
        .expect("building");
    let room = storage
        .create_room(building, "Lecture Theatre", 200, false, true)
        .await
        .expect("room");
    storage.set_room_active(room, false).await.expect("toggle");

    let rooms = storage.list_rooms().await.expect("rooms");
    assert!(!rooms[0].active);
}

#[tokio::test]
async fn tags_without_group_load_with_empty_relation() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let group = storage
        .create_tag_group("Skills", true, false, true)
        .await
        .expect("group");
    storage
        .create_tag(Some(group), "Numerical", Some("#00ff00"), true)
        .await
        .expect("tag");
    storage
        .create_tag(None, "Orphan", None, true)
        .await
        .expect("tag");

    let tags = storage.list_tags().await.expect("tags");
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "Numerical");
    assert_eq!(tags[0].display_name(), "Skills: Numerical");
    assert!(tags[1].group.is_none());
}

#[tokio::test]
async fn faculty_list_is_sorted_by_surname_and_includes_roles() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .create_faculty(&faculty("zed", "Anna", "Zed"), &[Role::Faculty])
        .await
        .expect("faculty");
    storage
        .create_faculty(&faculty("abel", "Mark", "Abel"), &[Role::Faculty, Role::Admin])
        .await
        .expect("faculty");
    storage
        .create_faculty(&faculty("stu", "Sam", "Student"), &[Role::Student])
        .await
        .expect("student");

    let staff = storage.list_faculty().await.expect("faculty");
    assert_eq!(staff.len(), 2);
    assert_eq!(staff[0].name.last_name, "Abel");
    assert!(staff[0].roles.contains(&Role::Admin));
    assert_eq!(staff[1].name.last_name, "Zed");
}

#[tokio::test]
async fn projects_load_owner_group_and_tags() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let owner = storage
        .create_faculty(&faculty("jdoe", "Jane", "Doe"), &[Role::Faculty])
        .await
        .expect("owner");
    let other = storage
        .create_faculty(&faculty("rroe", "Rick", "Roe"), &[Role::Faculty])
        .await
        .expect("owner");
    let group = storage
        .create_research_group("TPP", "Theoretical Particle Physics", Some("#123456"), true)
        .await
        .expect("group");
    let tag = storage
        .create_tag(None, "Computational", None, true)
        .await
        .expect("tag");
    let project = storage
        .create_project(owner, Some(group), "Dark matter halos", true)
        .await
        .expect("project");
    storage.tag_project(project, tag).await.expect("tag project");
    storage
        .create_project(other, None, "Another project", false)
        .await
        .expect("project");

    let all = storage.list_projects(None).await.expect("projects");
    assert_eq!(all.len(), 2);

    let mine = storage.list_projects(Some(owner)).await.expect("projects");
    assert_eq!(mine.len(), 1);
    let project = &mine[0];
    assert_eq!(project.owner.as_ref().expect("owner").name.last_name, "Doe");
    assert_eq!(project.group.as_ref().expect("group").abbreviation, "TPP");
    assert_eq!(project.tags.len(), 1);
    assert!(project.last_edited.is_some());
}

#[tokio::test]
async fn assessor_availability_round_trips_counts() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let assessment = storage
        .create_assessment("Year 4 presentations", true, false, false)
        .await
        .expect("assessment");
    let assessor = storage
        .create_faculty(&faculty("jdoe", "Jane", "Doe"), &[Role::Faculty])
        .await
        .expect("faculty");
    storage
        .set_availability(
            assessment,
            assessor,
            &AvailabilityRecord {
                confirmed: true,
                available_sessions: 4,
                ifneeded_sessions: 2,
                unavailable_sessions: 1,
                comment: Some("mornings only".to_string()),
                ..AvailabilityRecord::default()
            },
        )
        .await
        .expect("availability");

    let loaded = storage
        .assessment(assessment)
        .await
        .expect("query")
        .expect("assessment exists");
    assert!(loaded.availability_requested);

    let assessors = storage.list_assessors(assessment).await.expect("assessors");
    assert_eq!(assessors.len(), 1);
    assert_eq!(assessors[0].faculty_id, assessor);
    assert!(assessors[0].confirmed);
    assert_eq!(assessors[0].available_sessions, 4);
    assert_eq!(assessors[0].comment.as_deref(), Some("mornings only"));
}

#[tokio::test]
async fn unknown_assessment_is_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let missing = storage
        .assessment(AssessmentId(42))
        .await
        .expect("query");
    assert!(missing.is_none());
}

#[tokio::test]
async fn in_memory_database_is_shared_by_concurrent_queries() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .create_building("Arts A", None, true)
        .await
        .expect("building");

    let (a, b, c, d) = tokio::join!(
        storage.list_buildings(),
        storage.list_buildings(),
        storage.list_rooms(),
        storage.list_buildings(),
    );
    assert_eq!(a.expect("first").len(), 1);
    assert_eq!(b.expect("second").len(), 1);
    assert!(c.expect("rooms").is_empty());
    assert_eq!(d.expect("fourth").len(), 1);
}

#[test]
fn recognises_in_memory_urls() {
    assert!(is_memory_url("sqlite::memory:"));
    assert!(is_memory_url("sqlite://file:shared?mode=memory&cache=shared"));
    assert!(!is_memory_url("sqlite://./data/allocation.db"));
}
