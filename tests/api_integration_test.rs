use cotizador::catalog::DEFAULT_MATERIALS;
use cotizador::db;
use cotizador::models::{client, job, job_material, material, profile, quote, user};
use cotizador::services::{client_service, material_service, profile_service, quote_service};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

// Helper to create a test user
async fn create_test_user(db: &DatabaseConnection, email: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let new_user = user::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set("$argon2id$dummy".to_string()),
        role: Set("admin".to_string()),
        email_verified: Set(true),
        verification_token: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = user::Entity::insert(new_user)
        .exec(db)
        .await
        .expect("Failed to create user");
    res.last_insert_id
}

fn test_profile_dto(state: &str) -> profile::ProfileDto {
    profile::ProfileDto {
        id: None,
        business_name: "Herrería El Yunque".to_string(),
        address: "Av. Revolución 123".to_string(),
        state: state.to_string(),
        rfc: "HYM840215KL7".to_string(),
        phone: "3312345678".to_string(),
        email: "contacto@elyunque.mx".to_string(),
        fiscal_regime: Some("601".to_string()),
        cfdi_use: Some("G03".to_string()),
        payment_method: Some("PUE".to_string()),
        logo_url: None,
        is_pro: false,
    }
}

// Helper: onboard a profile through the service so the catalog is seeded
async fn create_test_profile(db: &DatabaseConnection, user_id: i32, state: &str) -> i32 {
    profile_service::create_profile(db, user_id, test_profile_dto(state))
        .await
        .expect("Failed to create profile")
        .id
}

async fn create_test_client(db: &DatabaseConnection, profile_id: i32, name: &str) -> i32 {
    let dto = client::ClientDto {
        id: None,
        name: name.to_string(),
        phone: None,
        email: None,
        address: None,
        rfc: None,
        fiscal_regime: None,
        cfdi_use: None,
        payment_method: None,
        notes: None,
    };
    client_service::create_client(db, profile_id, dto)
        .await
        .expect("Failed to create client")
        .id
        .unwrap()
}

fn quote_input(client_id: i32, material_id: i32) -> quote_service::CreateQuoteInput {
    quote_service::CreateQuoteInput {
        client_id,
        valid_until: "2099-12-31".to_string(),
        discount_percentage: 0.0,
        profit_percentage: 30.0,
        advance_payment: 0.0,
        requires_invoice: false,
        notes: None,
        jobs: vec![quote_service::JobPayload {
            r#type: "Portón".to_string(),
            description: "Portón de dos hojas".to_string(),
            width: Some(3.0),
            height: Some(2.2),
            depth: None,
            quantity: 1,
            labor_cost: 500.0,
            additional_costs: 0.0,
            notes: None,
            materials: vec![quote_service::JobMaterialInput {
                material_id,
                quantity: 2.0,
                unit_price: None,
            }],
        }],
    }
}

#[tokio::test]
async fn test_client_crud() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "crud@taller.mx").await;
    let profile_id = create_test_profile(&db, user_id, "Jalisco").await;

    // Create
    let client_id = create_test_client(&db, profile_id, "Constructora Díaz").await;

    // Read
    let fetched = client_service::get_client(&db, profile_id, client_id)
        .await
        .expect("Client not found");
    assert_eq!(fetched.name, "Constructora Díaz");

    // Update
    let mut dto = fetched;
    dto.name = "Constructora Díaz SA de CV".to_string();
    dto.rfc = Some("cdi900101ab1".to_string());
    let updated = client_service::update_client(&db, profile_id, client_id, dto)
        .await
        .expect("Update failed");
    assert_eq!(updated.name, "Constructora Díaz SA de CV");
    // RFC is normalized to uppercase on write
    assert_eq!(updated.rfc.as_deref(), Some("CDI900101AB1"));

    // Delete
    client_service::delete_client(&db, profile_id, client_id)
        .await
        .expect("Delete failed");
    assert!(client_service::get_client(&db, profile_id, client_id)
        .await
        .is_err());
}

#[tokio::test]
async fn test_onboarding_seeds_adjusted_catalog() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "onboard@taller.mx").await;

    // Baja California carries a 1.15 multiplier
    let profile_id = create_test_profile(&db, user_id, "Baja California").await;

    let count = material::Entity::find()
        .filter(material::Column::ProfileId.eq(profile_id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(count as usize, DEFAULT_MATERIALS.len());

    let ptr = material::Entity::find()
        .filter(material::Column::ProfileId.eq(profile_id))
        .filter(material::Column::Name.eq("PTR 1x1 calibre 14"))
        .one(&db)
        .await
        .unwrap()
        .expect("PTR not seeded");
    // 36 * 1.15 = 41.4, rounded to whole pesos
    assert_eq!(ptr.price, 41.0);
}

#[tokio::test]
async fn test_onboarding_unknown_state_keeps_base_prices() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "fallback@taller.mx").await;
    let profile_id = create_test_profile(&db, user_id, "Isla Ficticia").await;

    let ptr = material::Entity::find()
        .filter(material::Column::ProfileId.eq(profile_id))
        .filter(material::Column::Name.eq("PTR 1x1 calibre 14"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ptr.price, 36.0);
}

#[tokio::test]
async fn test_second_profile_for_same_user_is_rejected() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "dup@taller.mx").await;
    create_test_profile(&db, user_id, "Jalisco").await;

    let result = profile_service::create_profile(&db, user_id, test_profile_dto("Jalisco")).await;
    assert!(result.is_err(), "Second profile should be rejected");
}

#[tokio::test]
async fn test_create_quote_persists_snapshot() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "quote@taller.mx").await;
    let profile_id = create_test_profile(&db, user_id, "Jalisco").await;
    let client_id = create_test_client(&db, profile_id, "María Fernández").await;

    // Jalisco multiplier is 1.0 so the seeded PTR keeps its base price of 36
    let ptr = material::Entity::find()
        .filter(material::Column::ProfileId.eq(profile_id))
        .filter(material::Column::Name.eq("PTR 1x1 calibre 14"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();

    let created = quote_service::create_quote(&db, profile_id, quote_input(client_id, ptr.id))
        .await
        .expect("Quote creation failed");

    // 2 * 36 + 500 = 572; +30% profit = 743.6; +16% IVA = 862.576
    assert!((created.quote.subtotal - 572.0).abs() < 1e-9);
    assert!((created.quote.tax_amount - 118.976).abs() < 1e-9);
    assert!((created.quote.total - 862.576).abs() < 1e-9);
    assert!((created.quote.remaining_payment - 862.576).abs() < 1e-9);
    assert_eq!(created.quote.status, "draft");
    assert!(created.quote.quote_number.starts_with("COT-"));

    assert_eq!(created.jobs.len(), 1);
    assert!((created.jobs[0].job_total - 572.0).abs() < 1e-9);
    let line = &created.jobs[0].materials[0];
    assert_eq!(line.material_name, "PTR 1x1 calibre 14");
    assert!((line.unit_price - 36.0).abs() < 1e-9);
    assert!((line.total_price - 72.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_material_price_change_does_not_reprice_quote() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "snapshot@taller.mx").await;
    let profile_id = create_test_profile(&db, user_id, "Jalisco").await;
    let client_id = create_test_client(&db, profile_id, "Cliente").await;

    let ptr = material::Entity::find()
        .filter(material::Column::ProfileId.eq(profile_id))
        .filter(material::Column::Name.eq("PTR 1x1 calibre 14"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();

    let created = quote_service::create_quote(&db, profile_id, quote_input(client_id, ptr.id))
        .await
        .unwrap();

    // Bump the catalog price after the quote exists
    let mut dto = cotizador::models::MaterialDto::from(ptr);
    dto.price = 99.0;
    material_service::update_material(&db, profile_id, dto.id.unwrap(), dto)
        .await
        .unwrap();

    // The quote keeps its snapshot
    let fetched = quote_service::get_quote(&db, profile_id, created.quote.id)
        .await
        .unwrap();
    assert!((fetched.quote.total - 862.576).abs() < 1e-9);
    assert!((fetched.jobs[0].materials[0].unit_price - 36.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_quote_status_lifecycle() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "status@taller.mx").await;
    let profile_id = create_test_profile(&db, user_id, "Jalisco").await;
    let client_id = create_test_client(&db, profile_id, "Cliente").await;

    let ptr = material::Entity::find()
        .filter(material::Column::ProfileId.eq(profile_id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();

    let created = quote_service::create_quote(&db, profile_id, quote_input(client_id, ptr.id))
        .await
        .unwrap();
    let quote_id = created.quote.id;

    // draft -> sent -> approved
    let sent = quote_service::update_status(&db, profile_id, quote_id, "sent")
        .await
        .unwrap();
    assert_eq!(sent.status, "sent");

    let approved = quote_service::update_status(&db, profile_id, quote_id, "approved")
        .await
        .unwrap();
    assert_eq!(approved.status, "approved");
    // Totals survive every transition untouched
    assert!((approved.total - created.quote.total).abs() < 1e-9);

    // approved is terminal
    assert!(quote_service::update_status(&db, profile_id, quote_id, "sent")
        .await
        .is_err());
}

#[tokio::test]
async fn test_delete_quote_cascades_to_jobs_and_lines() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "cascade@taller.mx").await;
    let profile_id = create_test_profile(&db, user_id, "Jalisco").await;
    let client_id = create_test_client(&db, profile_id, "Cliente").await;

    let ptr = material::Entity::find()
        .filter(material::Column::ProfileId.eq(profile_id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();

    let created = quote_service::create_quote(&db, profile_id, quote_input(client_id, ptr.id))
        .await
        .unwrap();
    let quote_id = created.quote.id;
    let job_id = created.jobs[0].job.id;

    quote_service::delete_quote(&db, profile_id, quote_id)
        .await
        .unwrap();

    assert!(quote::Entity::find_by_id(quote_id)
        .one(&db)
        .await
        .unwrap()
        .is_none());
    assert!(job::Entity::find_by_id(job_id)
        .one(&db)
        .await
        .unwrap()
        .is_none());
    let lines = job_material::Entity::find()
        .filter(job_material::Column::JobId.eq(job_id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(lines, 0);
}

#[tokio::test]
async fn test_quotes_are_profile_scoped() {
    let db = setup_test_db().await;

    let user_a = create_test_user(&db, "a@taller.mx").await;
    let profile_a = create_test_profile(&db, user_a, "Jalisco").await;
    let client_a = create_test_client(&db, profile_a, "Cliente A").await;

    let user_b = create_test_user(&db, "b@taller.mx").await;
    let profile_b = create_test_profile(&db, user_b, "Sonora").await;

    let ptr = material::Entity::find()
        .filter(material::Column::ProfileId.eq(profile_a))
        .one(&db)
        .await
        .unwrap()
        .unwrap();

    let created = quote_service::create_quote(&db, profile_a, quote_input(client_a, ptr.id))
        .await
        .unwrap();

    // The other workshop cannot see or delete it
    assert!(quote_service::get_quote(&db, profile_b, created.quote.id)
        .await
        .is_err());
    assert!(quote_service::delete_quote(&db, profile_b, created.quote.id)
        .await
        .is_err());

    let visible = quote_service::list_quotes(
        &db,
        profile_b,
        quote_service::QuoteFilter::default(),
    )
    .await
    .unwrap();
    assert!(visible.is_empty());
}
