use super::Entity;
use crate::db::{bookings, rooms, users, Store};
use crate::error::{AppError, Result};

/// Render every row of `entity` as CSV, header first
///
/// An empty table yields a header-only document.
pub async fn export_csv(store: &Store, entity: Entity) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(entity.export_columns())?;

    let rows = match entity {
        Entity::Users => {
            let rows = users::list_users(store.pool()).await?;
            for user in &rows {
                writer.write_record([
                    user.id.to_string().as_str(),
                    user.name.as_str(),
                    user.email.as_str(),
                    user.phone.as_deref().unwrap_or(""),
                ])?;
            }
            rows.len()
        }
        Entity::Rooms => {
            let rows = rooms::list_rooms(store.pool()).await?;
            for room in &rows {
                writer.write_record([
                    room.id.to_string(),
                    room.name.clone(),
                    room.capacity.to_string(),
                    room.price.to_string(),
                ])?;
            }
            rows.len()
        }
        Entity::Bookings => {
            let rows = bookings::all_bookings(store.pool()).await?;
            for booking in &rows {
                writer.write_record([
                    booking.id.to_string(),
                    booking.user_id.to_string(),
                    booking.room_id.to_string(),
                    booking.checkin_date.clone(),
                    booking.nights.to_string(),
                    booking.total.to_string(),
                ])?;
            }
            rows.len()
        }
    };

    tracing::info!("Exported {} {}", rows, entity);

    writer
        .into_inner()
        .map_err(|e| AppError::Csv(e.into_error().into()))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::bulk::{import_csv, ImportOptions};
    use crate::db::open_store;
    use crate::engine::BookingEngine;
    use crate::models::{BookingDraft, NewRoom, NewUser};

    #[tokio::test]
    async fn test_export_empty_table_is_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(temp_dir.path().join("test.db"), 1).await.unwrap();

        let csv = export_csv(&store, Entity::Bookings).await.unwrap();
        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "id,user_id,room_id,checkin_date,nights,total\n"
        );
    }

    #[tokio::test]
    async fn test_export_rows() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(temp_dir.path().join("test.db"), 1).await.unwrap();
        let engine = BookingEngine::new(store.clone());

        let user = users::insert_user(
            store.pool(),
            &NewUser {
                name: "Smith, Jo".into(),
                email: "jo@example.com".into(),
                phone: None,
            },
        )
        .await
        .unwrap();
        let room = rooms::insert_room(
            store.pool(),
            &NewRoom {
                name: "Lake View".into(),
                capacity: 2,
                price: 100.0,
            },
        )
        .await
        .unwrap();
        engine
            .commit_booking(
                &BookingDraft {
                    user_id: user,
                    room_id: room,
                    checkin_date: "2024-06-01".into(),
                    nights: 2,
                    total: Some(180.5),
                },
                None,
            )
            .await
            .unwrap();

        let users_csv = String::from_utf8(export_csv(&store, Entity::Users).await.unwrap()).unwrap();
        assert_eq!(
            users_csv,
            format!("id,name,email,phone\n{user},\"Smith, Jo\",jo@example.com,\n")
        );

        let rooms_csv = String::from_utf8(export_csv(&store, Entity::Rooms).await.unwrap()).unwrap();
        assert_eq!(rooms_csv, format!("id,name,capacity,price\n{room},Lake View,2,100\n"));

        let bookings_csv =
            String::from_utf8(export_csv(&store, Entity::Bookings).await.unwrap()).unwrap();
        assert!(bookings_csv.ends_with(&format!("{user},{room},2024-06-01,2,180.5\n")));
    }

    #[tokio::test]
    async fn test_exported_users_import_into_fresh_store() {
        let source_dir = TempDir::new().unwrap();
        let source = open_store(source_dir.path().join("source.db"), 1).await.unwrap();
        for (name, email) in [("Ann", "ann@example.com"), ("Ben", "ben@example.com")] {
            users::insert_user(
                source.pool(),
                &NewUser {
                    name: name.into(),
                    email: email.into(),
                    phone: Some("555".into()),
                },
            )
            .await
            .unwrap();
        }
        let csv = export_csv(&source, Entity::Users).await.unwrap();

        let target_dir = TempDir::new().unwrap();
        let target = open_store(target_dir.path().join("target.db"), 1).await.unwrap();
        let engine = BookingEngine::new(target.clone());
        let report = import_csv(&engine, Entity::Users, &csv, ImportOptions::default())
            .await
            .unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(
            users::list_users(target.pool()).await.unwrap(),
            users::list_users(source.pool()).await.unwrap()
        );
    }
}
