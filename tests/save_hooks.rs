use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use anyhow::Result;
use products_hr::{EmployeeChanges, NewEmployee, RoleInput, StaffDirectory};
use staff_tests::{counted_directory, sqlite_pool};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    Layer,
    layer::{Context, SubscriberExt},
    util::SubscriberInitExt,
};

#[tokio::test]
async fn each_save_runs_hooks_exactly_once() -> Result<()> {
    let (dir, counter) = counted_directory().await?;

    let ada = dir.create_employee(NewEmployee::new("Ada", "Lovelace")).await?;
    assert_eq!((counter.inserts(), counter.updates()), (1, 0));

    dir.update_employee(
        ada.id,
        EmployeeChanges {
            firstname: Some("Augusta".into()),
            ..Default::default()
        },
    )
    .await?;
    dir.update_employee(ada.id, EmployeeChanges::default()).await?;
    assert_eq!((counter.inserts(), counter.updates()), (1, 2));
    Ok(())
}

#[tokio::test]
async fn failed_writes_and_bulk_clears_do_not_run_hooks() -> Result<()> {
    let (dir, counter) = counted_directory().await?;
    let role = dir.create_role(RoleInput::new("STD", "Analyst")).await?;
    let boss = dir
        .create_employee(NewEmployee::new("Grace", "Hopper").with_role(role.id))
        .await?;
    dir.create_employee(NewEmployee::new("Ada", "Lovelace").with_manager(boss.id))
        .await?;
    assert_eq!(counter.total(), 2);

    assert!(dir.create_employee(NewEmployee::new(" ", "Nobody")).await.is_err());
    assert!(
        dir.update_employee(
            boss.id,
            EmployeeChanges {
                surname: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .is_err()
    );
    dir.delete_role(role.id).await?;
    dir.delete_employee(boss.id).await?;
    assert_eq!(counter.total(), 2);
    Ok(())
}

#[tokio::test]
async fn hooks_run_in_registration_order() -> Result<()> {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut dir = StaffDirectory::new(sqlite_pool().await?);
    for tag in ["audit", "notify"] {
        let order = order.clone();
        dir.on_save(move |_: &products_hr::SaveEvent<'_>| {
            order.lock().unwrap().push(tag);
        });
    }

    dir.create_employee(NewEmployee::new("Ada", "Lovelace")).await?;
    assert_eq!(*order.lock().unwrap(), vec!["audit", "notify"]);
    Ok(())
}

struct DebugSaveLines(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for DebugSaveLines {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() == Level::DEBUG && meta.target() == "products_hr::hooks" {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[tokio::test]
async fn default_hook_logs_one_debug_line_per_save() -> Result<()> {
    let dir = StaffDirectory::new(sqlite_pool().await?);
    let lines = Arc::new(AtomicUsize::new(0));
    let _guard = tracing_subscriber::registry()
        .with(DebugSaveLines(lines.clone()))
        .set_default();

    let ada = dir.create_employee(NewEmployee::new("Ada", "Lovelace")).await?;
    assert_eq!(lines.load(Ordering::SeqCst), 1);

    dir.update_employee(
        ada.id,
        EmployeeChanges {
            surname: Some("King".into()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(lines.load(Ordering::SeqCst), 2);

    dir.employees().await?;
    dir.get_managers().await?;
    assert_eq!(lines.load(Ordering::SeqCst), 2);
    Ok(())
}
