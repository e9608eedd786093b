use std::{future::Future, sync::Arc};

use axum::extract::State;
use axum_derive_error::ErrorResponse;
use db::{student, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};
use derive_more::{Display, Error, From};
use once_cell::sync::Lazy;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::info;

/// Count of student names printed by a single request.
const PRINTED_NAMES: u64 = 6;

/// Count of names printed by a single task.
const NAMES_PER_TASK: usize = 2;

/// Process-wide lock held while printing a single name.
static PRINT_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum StudentPrintError {
    DatabaseError(DbErr),
}

/// Print student names from the request task and two background tasks
/// without any synchronization between them.
pub(super) async fn print_parallel(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<(), StudentPrintError> {
    let names = first_names(&db).await?;

    spawn_printers(names, |name| async move {
        info!(%name, "student name");
    })
    .await;

    Ok(())
}

/// Print student names from the request task and two background tasks,
/// holding a shared lock around every single print.
pub(super) async fn print_synchronized(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<(), StudentPrintError> {
    let names = first_names(&db).await?;

    spawn_printers(names, |name| async move {
        let _guard = PRINT_LOCK.lock().await;
        info!(%name, "student name");
    })
    .await;

    Ok(())
}

async fn first_names(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    student::Entity::find()
        .select_only()
        .column(student::Column::Name)
        .order_by_asc(student::Column::Id)
        .limit(PRINTED_NAMES)
        .into_tuple::<String>()
        .all(db)
        .await
}

/// Spawn a task for every chunk of names except the first one,
/// which is printed on the current task.
///
/// Returns handles of the spawned tasks, handlers drop them without waiting.
async fn spawn_printers<F, Fut>(names: Vec<String>, print: F) -> Vec<JoinHandle<()>>
where
    F: Fn(String) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut chunks = names
        .chunks(NAMES_PER_TASK)
        .map(<[String]>::to_vec)
        .collect::<Vec<_>>()
        .into_iter();

    let inline = chunks.next().unwrap_or_default();

    let handles = chunks
        .map(|chunk| {
            let print = print.clone();

            tokio::spawn(async move {
                for name in chunk {
                    print(name).await;
                }
            })
        })
        .collect();

    for name in inline {
        print(name).await;
    }

    handles
}
