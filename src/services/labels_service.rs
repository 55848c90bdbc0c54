use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::label::{CreateLabelRequest, Label, NewLabel, UpdateLabelRequest},
    db::repositories::LabelRepo,
    db::soft_delete::{Visibility, require_active},
    error::AppError,
    services::context::RequestContext,
    validation::label::normalize_label_name,
};

/// Labels are global; any authenticated actor may manage them.
pub struct LabelsService;

impl LabelsService {
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateLabelRequest,
    ) -> Result<Label, AppError> {
        let name = normalize_label_name(&req.name)?;

        if LabelRepo::exists_by_name(conn, &name, None)? {
            return Err(AppError::field("name", "Label with this name already exists"));
        }

        let label = LabelRepo::insert(conn, &NewLabel { name }).map_err(|e| {
            AppError::unique_violation(e, "name", "Label with this name already exists")
        })?;
        tracing::info!(label_id = %label.id, actor = %ctx.user_id, "Label created");
        Ok(label)
    }

    pub fn get(conn: &mut PgConnection, label_id: Uuid) -> Result<Label, AppError> {
        require_active(LabelRepo::find_by_id(conn, label_id)?, "Label")
    }

    pub fn list(conn: &mut PgConnection) -> Result<Vec<Label>, AppError> {
        Ok(LabelRepo::list(conn, Visibility::Active)?)
    }

    pub fn list_archived(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<Label>, AppError> {
        if !ctx.is_elevated() {
            return Err(AppError::forbidden("Only staff can view archived labels"));
        }
        Ok(LabelRepo::list(conn, Visibility::Archived)?)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        label_id: Uuid,
        req: &UpdateLabelRequest,
    ) -> Result<Label, AppError> {
        let label = Self::get(conn, label_id)?;
        let name = normalize_label_name(&req.name)?;

        if LabelRepo::exists_by_name(conn, &name, Some(label.id))? {
            return Err(AppError::field("name", "Label with this name already exists"));
        }

        let updated = LabelRepo::rename(conn, label.id, &name).map_err(|e| {
            AppError::unique_violation(e, "name", "Label with this name already exists")
        })?;
        tracing::info!(label_id = %updated.id, actor = %ctx.user_id, "Label updated");
        Ok(updated)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        label_id: Uuid,
    ) -> Result<(), AppError> {
        let label = Self::get(conn, label_id)?;

        LabelRepo::soft_delete(conn, label.id)?;
        tracing::info!(label_id = %label.id, actor = %ctx.user_id, "Label deleted");
        Ok(())
    }
}
