use proptest::prelude::*;
use shared::{
    domain::{Building, BuildingId, Faculty, PersonName, Role, UserId},
    protocol::Cell,
};
use views::{
    encode,
    markup::StatusBadge,
    project,
    tables::{BuildingRows, FacultyRows},
};

fn building_strategy() -> impl Strategy<Value = Building> {
    (any::<i64>(), "[A-Za-z <&>]{1,16}", proptest::option::of("#[0-9a-f]{6}"), any::<bool>())
        .prop_map(|(id, name, colour, active)| Building {
            id: BuildingId(id),
            name,
            colour,
            active,
        })
}

fn faculty_strategy() -> impl Strategy<Value = Faculty> {
    ("[A-Za-z' -]{1,12}", "[A-Za-z' -]{1,12}", any::<bool>()).prop_map(
        |(first_name, last_name, active)| Faculty {
            id: UserId(1),
            name: PersonName {
                email: format!("{}@example.ac.uk", first_name.len()),
                first_name,
                last_name,
            },
            username: "user".to_string(),
            active,
            roles: vec![Role::Faculty],
            last_active: None,
        },
    )
}

proptest! {
    #[test]
    fn projection_preserves_cardinality_and_order(
        buildings in proptest::collection::vec(building_strategy(), 0..24)
    ) {
        let rows = project(&BuildingRows, &buildings, &()).expect("rows");
        prop_assert_eq!(rows.len(), buildings.len());
        for (row, building) in rows.iter().zip(&buildings) {
            prop_assert_eq!(row.get("name"), Some(&Cell::text(building.name.clone())));
        }
    }

    #[test]
    fn status_field_partitions_on_active(building in building_strategy()) {
        let rows = project(&BuildingRows, std::slice::from_ref(&building), &()).expect("rows");
        let expected = if building.active {
            StatusBadge::Active.render()
        } else {
            StatusBadge::Inactive.render()
        };
        prop_assert_eq!(rows[0].get("active"), Some(&Cell::Markup(expected)));
    }

    #[test]
    fn name_sortkey_is_surname_then_forename(faculty in faculty_strategy()) {
        let rows = project(&FacultyRows, std::slice::from_ref(&faculty), &()).expect("rows");
        let name = rows[0].get("name").and_then(Cell::as_sortable).expect("sortable");
        prop_assert_eq!(
            &name.sortkey,
            &format!("{}{}", faculty.name.last_name, faculty.name.first_name)
        );
    }

    #[test]
    fn rendering_is_idempotent(buildings in proptest::collection::vec(building_strategy(), 0..8)) {
        let first = encode(&project(&BuildingRows, &buildings, &()).expect("rows")).expect("json");
        let second = encode(&project(&BuildingRows, &buildings, &()).expect("rows")).expect("json");
        prop_assert_eq!(first, second);
    }
}
