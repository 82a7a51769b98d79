use mongodb::{bson::doc, Database, IndexModel};

pub async fn ensure_indexes(db: &Database) -> Result<(), String> {
    // orders: query by user quickly and sort by created_at desc
    {
        let col = db.collection::<mongodb::bson::Document>("orders");
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // chat_logs: history is fetched newest-first per user
    {
        let col = db.collection::<mongodb::bson::Document>("chat_logs");
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}
