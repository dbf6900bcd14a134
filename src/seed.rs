use crate::auth::hash_password;
use crate::models::{client, profile, user};
use crate::services::{material_service, quote_service};
use sea_orm::*;

/// Seed a demo workshop: verified admin account, business profile with
/// the Jalisco-adjusted catalog, a couple of clients and one quote.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    // 1. Demo user (already verified so login works out of the box)
    let password_hash = hash_password("herrero123").expect("hash demo password");

    let demo_user = user::ActiveModel {
        email: Set("demo@cotizador.mx".to_owned()),
        password_hash: Set(password_hash),
        role: Set("admin".to_owned()),
        email_verified: Set(true),
        verification_token: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };

    user::Entity::insert(demo_user)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(user::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await?;

    let user_id = user::Entity::find()
        .filter(user::Column::Email.eq("demo@cotizador.mx"))
        .one(db)
        .await?
        .map(|u| u.id)
        .unwrap_or(1);

    // 2. Business profile; skip the rest if it already exists
    if profile::Entity::find()
        .filter(profile::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let demo_profile = profile::ActiveModel {
        user_id: Set(user_id),
        business_name: Set("Herrería El Yunque".to_owned()),
        address: Set("Av. Revolución 123, Guadalajara".to_owned()),
        state: Set("Jalisco".to_owned()),
        rfc: Set("HYM840215KL7".to_owned()),
        phone: Set("3312345678".to_owned()),
        email: Set("contacto@elyunque.mx".to_owned()),
        fiscal_regime: Set(Some("601".to_owned())),
        cfdi_use: Set(Some("G03".to_owned())),
        payment_method: Set(Some("PUE".to_owned())),
        logo_url: Set(None),
        is_pro: Set(false),
        pro_expires_at: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };

    let saved_profile = demo_profile.insert(db).await?;

    // 3. Region-adjusted default catalog
    material_service::seed_catalog(db, saved_profile.id, "Jalisco")
        .await
        .map_err(|e| DbErr::Custom(e.to_string()))?;

    // 4. Clients
    let clients = vec![
        ("Constructora Díaz", Some("3311112222"), Some("compras@constructoradiaz.mx")),
        ("María Fernández", Some("3322223333"), None),
    ];

    let mut first_client_id = None;
    for (name, phone, email) in clients {
        let saved = client::ActiveModel {
            profile_id: Set(saved_profile.id),
            name: Set(name.to_owned()),
            phone: Set(phone.map(str::to_owned)),
            email: Set(email.map(str::to_owned)),
            address: Set(None),
            rfc: Set(None),
            fiscal_regime: Set(None),
            cfdi_use: Set(None),
            payment_method: Set(None),
            notes: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        first_client_id.get_or_insert(saved.id);
    }

    // 5. A sample quote through the normal creation path
    if let Some(client_id) = first_client_id {
        let ptr = crate::models::material::Entity::find()
            .filter(crate::models::material::Column::ProfileId.eq(saved_profile.id))
            .filter(crate::models::material::Column::Name.eq("PTR 1x1 calibre 14"))
            .one(db)
            .await?;

        if let Some(ptr) = ptr {
            let valid_until = (chrono::Local::now() + chrono::Duration::days(30))
                .format("%Y-%m-%d")
                .to_string();

            let input = quote_service::CreateQuoteInput {
                client_id,
                valid_until,
                discount_percentage: 0.0,
                profit_percentage: 30.0,
                advance_payment: 0.0,
                requires_invoice: false,
                notes: Some("Cotización de demostración".to_owned()),
                jobs: vec![quote_service::JobPayload {
                    r#type: "Portón".to_owned(),
                    description: "Portón de dos hojas para cochera".to_owned(),
                    width: Some(3.0),
                    height: Some(2.2),
                    depth: None,
                    quantity: 1,
                    labor_cost: 500.0,
                    additional_costs: 0.0,
                    notes: None,
                    materials: vec![quote_service::JobMaterialInput {
                        material_id: ptr.id,
                        quantity: 2.0,
                        unit_price: None,
                    }],
                }],
            };

            quote_service::create_quote(db, saved_profile.id, input)
                .await
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }
    }

    Ok(())
}
