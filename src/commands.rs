use std::path::Path;
use crate::{emit_success, Field, FieldArgs, OutputMode};
use image::ImageFormat;
use recordkeep::codec;
use recordkeep::config::{ensure_db_dir, write_config, RecordkeepConfig};
use recordkeep::shell::{attachments_from, Attachments, RecordView, UpdateForm, UpdateInput, DATE_FORMAT};
use recordkeep::ui::{empty, header, info, noop, record_card, record_table, success};
use recordkeep::{RecordFields, SqliteStore};

fn open_store(database: &Path) -> anyhow::Result<SqliteStore> {
    ensure_db_dir(database)?;
    Ok(SqliteStore::open(database)?)
}

/// Resolve the image and signature flags into PNG blobs
fn attachments(fields: &FieldArgs) -> anyhow::Result<Attachments> {
    Ok(attachments_from(
        fields.image.as_deref(),
        fields.signature.as_deref(),
        fields.draw.as_deref(),
    )?)
}

pub fn run_init(output_mode: OutputMode, config_path: &Path, database: &Path, force: bool) -> anyhow::Result<()> {
    let config = RecordkeepConfig {
        database: Some(database.display().to_string()),
    };
    write_config(config_path, &config, force)?;

    if output_mode.is_human() {
        success(&format!("Wrote {}", config_path.display()));
        info("Database", &database.display().to_string());
    } else {
        let data = serde_json::json!({
            "config": config_path.display().to_string(),
            "database": database.display().to_string(),
        });
        emit_success(output_mode, "init", data)?;
    }
    Ok(())
}

pub fn run_create(output_mode: OutputMode, database: &Path, fields: FieldArgs) -> anyhow::Result<()> {
    let Attachments { image, signature } = attachments(&fields)?;
    let store = open_store(database)?;

    let date = fields
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive())
        .format(DATE_FORMAT)
        .to_string();
    let record = RecordFields::new(fields.text.unwrap_or_default(), fields.number.unwrap_or(0), date)
        .with_image(image)
        .with_signature(signature);

    let id = store.create(&record)?;

    if output_mode.is_human() {
        success(&format!("Record created successfully (id {})", id));
    } else {
        emit_success(output_mode, "create", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_read(output_mode: OutputMode, database: &Path, id: Option<i64>) -> anyhow::Result<()> {
    let store = open_store(database)?;

    let records = match id {
        Some(id) => vec![store.read(id)?],
        None => store.read_all()?,
    };
    let views: Vec<RecordView> = records.iter().map(RecordView::new).collect();

    if !output_mode.is_human() {
        return emit_success(output_mode, "read", serde_json::to_value(&views)?);
    }

    if views.is_empty() {
        empty("No records found.");
        return Ok(());
    }

    if id.is_some() {
        for view in &views {
            record_card(view);
        }
    } else {
        header(&format!("{} record(s) in {}", views.len(), database.display()));
        println!("{}", record_table(&views));
    }
    Ok(())
}

pub fn run_update(output_mode: OutputMode, database: &Path, id: i64, fields: FieldArgs) -> anyhow::Result<()> {
    let Attachments { image, signature } = attachments(&fields)?;
    let store = open_store(database)?;
    let form = UpdateForm::fetch(&store, id)?;

    let input = UpdateInput {
        text: fields.text,
        number: fields.number,
        date: fields.date.map(|d| d.format(DATE_FORMAT).to_string()),
        image,
        signature,
    };
    let updated = form.submit(&store, input)?;

    if output_mode.is_human() {
        if updated {
            success("Record updated successfully");
        } else {
            noop(id, "written");
        }
    } else {
        emit_success(output_mode, "update", serde_json::json!({ "id": id, "updated": updated }))?;
    }
    Ok(())
}

pub fn run_delete(output_mode: OutputMode, database: &Path, id: i64) -> anyhow::Result<()> {
    let store = open_store(database)?;
    let deleted = store.delete(id)?;

    if output_mode.is_human() {
        success("Record deleted successfully");
        if !deleted {
            noop(id, "deleted");
        }
    } else {
        emit_success(output_mode, "delete", serde_json::json!({ "id": id, "deleted": deleted }))?;
    }
    Ok(())
}

pub fn run_export(output_mode: OutputMode, database: &Path, id: i64, field: Field, out: &Path) -> anyhow::Result<()> {
    let store = open_store(database)?;
    let record = store.read(id)?;

    let (label, blob) = match field {
        Field::Image => ("image", record.fields.image),
        Field::Signature => ("signature", record.fields.signature),
    };
    let Some(blob) = blob else {
        anyhow::bail!("Record {} has no {}", id, label);
    };

    let picture = codec::decode(&blob)?;
    picture.save_with_format(out, ImageFormat::Png)?;

    if output_mode.is_human() {
        success(&format!("Exported {} of record {} to {}", label, id, out.display()));
    } else {
        let data = serde_json::json!({
            "id": id,
            "field": label,
            "out": out.display().to_string(),
            "width": picture.width(),
            "height": picture.height(),
        });
        emit_success(output_mode, "export", data)?;
    }
    Ok(())
}
