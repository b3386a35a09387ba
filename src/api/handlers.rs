//! Intent handlers

use tracing::{debug, info, warn};

use super::{
    confirm::Confirmation,
    intents::Intent,
    responses::Outcome,
};
use crate::{
    error::Field,
    state::{App, SaveOutcome},
};

/// Apply one intent to the application and publish the resulting view
pub fn handle_intent(app: &mut App, intent: Intent, confirm: &mut dyn Confirmation) -> Outcome {
    debug!("Handling intent {:?}", intent);
    let action = intent.action_name();

    let outcome = match intent {
        Intent::Add => add_handler(app),
        Intent::Edit { id } => edit_handler(app, id),
        Intent::Delete { id } => delete_handler(app, id, confirm),
        Intent::SetName { value } => set_field_handler(app, Field::Name, value),
        Intent::SetSeconds { value } => set_field_handler(app, Field::Seconds, value),
        Intent::Touch { field } => touch_handler(app, field),
        Intent::Save => save_handler(app),
        Intent::CloseModal => close_modal_handler(app),
        Intent::OpenRun { id } => open_run_handler(app, id),
        Intent::Start => start_handler(app),
        Intent::Stop => stop_handler(app),
        Intent::CloseRun => close_run_handler(app),
    };

    if outcome.is_ok() {
        app.record_action(action);
    }
    app.publish();
    outcome
}

/// Handle add - open the add modal with a generated name
pub fn add_handler(app: &mut App) -> Outcome {
    if app.editing.open_add(&app.store) {
        Outcome::ok("Adding exercise")
    } else {
        Outcome::ignored("A modal is already open")
    }
}

/// Handle edit - open the edit modal pre-filled from the record
pub fn edit_handler(app: &mut App, id: u64) -> Outcome {
    if app.editing.is_open() {
        return Outcome::ignored("A modal is already open");
    }
    if app.editing.open_edit(id, &app.store) {
        Outcome::ok(format!("Editing exercise {}", id))
    } else {
        Outcome::not_found(id)
    }
}

/// Handle delete - confirm, remove, and close anything pointing at the record
pub fn delete_handler(app: &mut App, id: u64, confirm: &mut dyn Confirmation) -> Outcome {
    let Some(record) = app.store.get(id) else {
        return Outcome::not_found(id);
    };

    let prompt = format!("Delete \"{}\"?", record.name);
    if !confirm.confirm(&prompt) {
        debug!("Delete of exercise {} declined", id);
        return Outcome::cancelled("Delete cancelled");
    }

    if !app.store.remove(id) {
        return Outcome::not_found(id);
    }
    app.forget_exercise(id);
    Outcome::ok(format!("Deleted exercise {}", id))
}

/// Handle a draft field change
pub fn set_field_handler(app: &mut App, field: Field, value: String) -> Outcome {
    if !app.editing.is_open() {
        return Outcome::ignored("No modal open");
    }
    match field {
        Field::Name => app.editing.set_name(value),
        Field::Seconds => app.editing.set_seconds(value),
    }
    Outcome::ok(format!("Updated {}", field))
}

/// Handle blur - mark a field as touched so its error shows
pub fn touch_handler(app: &mut App, field: Field) -> Outcome {
    if !app.editing.is_open() {
        return Outcome::ignored("No modal open");
    }
    app.editing.touch(field);
    Outcome::ok(format!("Touched {}", field))
}

/// Handle save - validate the draft and write it to the store
pub fn save_handler(app: &mut App) -> Outcome {
    match app.editing.save(&mut app.store, &app.rules) {
        SaveOutcome::Added(record) => {
            info!("Saved new exercise {} '{}'", record.id, record.name);
            Outcome::ok(format!("Added exercise {}", record.id))
        }
        SaveOutcome::Updated(id) => Outcome::ok(format!("Updated exercise {}", id)),
        SaveOutcome::Invalid(e) => Outcome::rejected(e.message),
        SaveOutcome::NotFound(id) => {
            warn!("Saved edit for missing exercise {}", id);
            Outcome::not_found(id)
        }
        SaveOutcome::NotOpen => Outcome::ignored("No modal open"),
    }
}

/// Handle close-modal - discard the draft
pub fn close_modal_handler(app: &mut App) -> Outcome {
    if !app.editing.is_open() {
        return Outcome::ignored("No modal open");
    }
    app.editing.close();
    Outcome::ok("Modal closed")
}

/// Handle open-run - select an exercise to run
pub fn open_run_handler(app: &mut App, id: u64) -> Outcome {
    if app.run.running_id().is_some() {
        return Outcome::ignored("A run is already open");
    }
    if app.run.open(id, &app.store) {
        Outcome::ok(format!("Opened run for exercise {}", id))
    } else {
        Outcome::not_found(id)
    }
}

/// Handle start - begin (or restart) ticking
pub fn start_handler(app: &mut App) -> Outcome {
    let Some(id) = app.run.running_id() else {
        return Outcome::ignored("No run open");
    };
    if app.run.start(&app.store) {
        Outcome::ok(format!("Started exercise {}", id))
    } else {
        Outcome::not_found(id)
    }
}

/// Handle stop - cancel ticking and reset the count
pub fn stop_handler(app: &mut App) -> Outcome {
    if app.run.running_id().is_none() {
        return Outcome::ignored("No run open");
    }
    app.run.stop();
    Outcome::ok("Stopped")
}

/// Handle close-run - stop and leave the run modal
pub fn close_run_handler(app: &mut App) -> Outcome {
    if app.run.running_id().is_none() {
        return Outcome::ignored("No run open");
    }
    app.run.close();
    Outcome::ok("Run closed")
}
