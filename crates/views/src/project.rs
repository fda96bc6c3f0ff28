use shared::{
    error::RenderError,
    protocol::{RowRecord, TableKind},
};

/// Maps one entity snapshot to one data-table row.
///
/// Implementations read the entity and the shared context only; the same
/// inputs always produce the same row.
pub trait RowRenderer {
    type Entity;
    type Context: ?Sized;

    const KIND: TableKind;

    fn render_row(
        &self,
        entity: &Self::Entity,
        ctx: &Self::Context,
    ) -> Result<RowRecord, RenderError>;
}

/// Renders every entity in input order. The first failing row aborts the
/// whole projection; no partial table is returned.
pub fn project<R: RowRenderer>(
    renderer: &R,
    entities: &[R::Entity],
    ctx: &R::Context,
) -> Result<Vec<RowRecord>, RenderError> {
    entities
        .iter()
        .map(|entity| renderer.render_row(entity, ctx))
        .collect()
}

/// JSON array of row objects, keyed by field name.
pub fn encode(rows: &[RowRecord]) -> Result<String, RenderError> {
    Ok(serde_json::to_string(rows)?)
}
