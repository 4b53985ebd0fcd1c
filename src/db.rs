// src/db.rs - Pool construction, schema bootstrap and seed data
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Arguments;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::models::{Client, Composition, Ingredient, Medication, Medicine, Technology};

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .database(&config.name)
        .username(&config.user)
        .password(&config.password);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect_with(options)
        .await
        .context("Failed to connect to PostgreSQL")?;

    log::info!(
        "Database pool ready ({}..{} connections)",
        config.min_connections,
        config.max_connections
    );

    Ok(pool)
}

const TABLE_QUERIES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS medication (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        manufacturer TEXT NOT NULL,
        critical_norm NUMERIC(12,2) NOT NULL,
        shelf_life INTEGER NOT NULL,
        unit_of_measure TEXT NOT NULL CHECK (unit_of_measure IN ('g', 'mg', 'ml', 'pc')),
        units_per_package INTEGER NOT NULL,
        price NUMERIC(12,2) NOT NULL,
        storage_conditions TEXT,
        current_amount NUMERIC(12,2) NOT NULL DEFAULT 0 CHECK (current_amount >= 0)
    )",
    "CREATE TABLE IF NOT EXISTS technology_of_preparation (
        id SERIAL PRIMARY KEY,
        description TEXT NOT NULL,
        preparation_time INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS ingredient (
        id INTEGER PRIMARY KEY REFERENCES medication(id),
        type TEXT NOT NULL,
        caution TEXT,
        incompatibility TEXT
    )",
    "CREATE TABLE IF NOT EXISTS medicine (
        id INTEGER PRIMARY KEY REFERENCES medication(id),
        type TEXT NOT NULL CHECK (type IN ('finished', 'manufactured')),
        kind TEXT NOT NULL CHECK
            (kind IN ('pills', 'mixture', 'ointment', 'solution', 'tincture', 'powder')),
        application TEXT NOT NULL CHECK (application IN ('internal', 'external', 'for mixing')),
        tech_prep_id INTEGER REFERENCES technology_of_preparation(id)
    )",
    "CREATE TABLE IF NOT EXISTS composition (
        medicine_id INTEGER NOT NULL REFERENCES medicine(id),
        ingredient_id INTEGER NOT NULL REFERENCES ingredient(id),
        amount NUMERIC(12,2) NOT NULL,
        PRIMARY KEY (medicine_id, ingredient_id)
    )",
    "CREATE TABLE IF NOT EXISTS client (
        id SERIAL PRIMARY KEY,
        surname TEXT NOT NULL,
        name TEXT NOT NULL,
        patronymic TEXT,
        phone_number TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS prescription (
        id SERIAL PRIMARY KEY,
        client_id INTEGER NOT NULL REFERENCES client(id),
        medicine_id INTEGER NOT NULL REFERENCES medicine(id),
        prescription_number INTEGER NOT NULL,
        doctor_surname TEXT NOT NULL,
        doctor_name TEXT NOT NULL,
        doctor_patronymic TEXT,
        signature BOOLEAN NOT NULL DEFAULT TRUE,
        stamp BOOLEAN NOT NULL DEFAULT TRUE,
        age INTEGER NOT NULL,
        diagnosis TEXT NOT NULL,
        amount NUMERIC(12,2) NOT NULL,
        application TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS medicine_order (
        id SERIAL PRIMARY KEY,
        prescription_id INTEGER NOT NULL REFERENCES prescription(id),
        client_id INTEGER NOT NULL REFERENCES client(id),
        order_number INTEGER NOT NULL,
        status TEXT NOT NULL CHECK
            (status IN ('waiting for a delivery', 'producing', 'ready', 'issued', 'cancelled')),
        date_of_issue DATE,
        start_date TIMESTAMPTZ NOT NULL DEFAULT now(),
        expected_date_of_issue TIMESTAMPTZ NOT NULL,
        cost NUMERIC(12,2) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS medication_delivery (
        id SERIAL PRIMARY KEY,
        medication_id INTEGER NOT NULL REFERENCES medication(id),
        application_date DATE NOT NULL,
        delivery_date DATE,
        amount NUMERIC(12,2) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS inventory (
        id SERIAL PRIMARY KEY,
        medication_id INTEGER NOT NULL REFERENCES medication(id),
        inventory_date DATE NOT NULL,
        amount INTEGER NOT NULL
    )",
];

// Склад и статусы заказов синхронизируются на уровне БД
const TRIGGER_QUERIES: &[&str] = &[
    "CREATE OR REPLACE FUNCTION apply_delivery_to_stock() RETURNS trigger AS $$
     BEGIN
         -- Склад пополняется один раз: при вставке с датой поставки либо
         -- при переходе delivery_date из NULL в NOT NULL
         IF NEW.delivery_date IS NOT NULL
            AND (TG_OP = 'INSERT' OR OLD.delivery_date IS NULL) THEN
             UPDATE medication
             SET current_amount = current_amount + NEW.amount
             WHERE id = NEW.medication_id;
         END IF;
         RETURN NEW;
     END;
     $$ LANGUAGE plpgsql",
    "DROP TRIGGER IF EXISTS delivery_stock_sync ON medication_delivery",
    "CREATE TRIGGER delivery_stock_sync
     AFTER INSERT OR UPDATE ON medication_delivery
     FOR EACH ROW EXECUTE FUNCTION apply_delivery_to_stock()",
    "CREATE OR REPLACE FUNCTION stamp_issued_order() RETURNS trigger AS $$
     BEGIN
         IF NEW.status = 'issued' AND NEW.date_of_issue IS NULL THEN
             NEW.date_of_issue := CURRENT_DATE;
         END IF;
         RETURN NEW;
     END;
     $$ LANGUAGE plpgsql",
    "DROP TRIGGER IF EXISTS order_issue_stamp ON medicine_order",
    "CREATE TRIGGER order_issue_stamp
     BEFORE INSERT OR UPDATE ON medicine_order
     FOR EACH ROW EXECUTE FUNCTION stamp_issued_order()",
];

const VIEW_QUERIES: &[&str] = &[
    "CREATE OR REPLACE VIEW clients_with_unclaimed_orders AS
     SELECT c.id AS client_id, c.surname, c.name, c.patronymic, c.phone_number,
            o.order_number, o.expected_date_of_issue
     FROM medicine_order o
     JOIN client c ON c.id = o.client_id
     WHERE o.status = 'ready' AND o.date_of_issue IS NULL",
    "CREATE OR REPLACE VIEW clients_waiting_for_delivery AS
     SELECT c.id AS client_id, c.surname, c.name, c.patronymic, c.phone_number,
            o.order_number, o.expected_date_of_issue,
            b.name AS medication_name, mc.type AS medication_type
     FROM medicine_order o
     JOIN client c ON c.id = o.client_id
     JOIN prescription p ON p.id = o.prescription_id
     JOIN medicine mc ON mc.id = p.medicine_id
     JOIN medication b ON b.id = mc.id
     WHERE o.status = 'waiting for a delivery'",
    "CREATE OR REPLACE VIEW medicine_details_view AS
     SELECT mc.id AS medicine_id, b.name AS medicine_name, mc.type AS medicine_type,
            t.description AS preparation_description,
            ib.name AS component_name, co.amount AS component_amount,
            ib.unit_of_measure AS component_unit_of_measure, ib.price AS component_price,
            ib.current_amount AS current_stock_amount
     FROM medicine mc
     JOIN medication b ON b.id = mc.id
     LEFT JOIN technology_of_preparation t ON t.id = mc.tech_prep_id
     LEFT JOIN composition co ON co.medicine_id = mc.id
     LEFT JOIN medication ib ON ib.id = co.ingredient_id",
];

// Все табличные функции на plpgsql с полной квалификацией колонок,
// чтобы имена OUT-параметров не конфликтовали с колонками таблиц.
const FUNCTION_QUERIES: &[&str] = &[
    "CREATE OR REPLACE FUNCTION count_unclaimed_orders_clients() RETURNS BIGINT AS $$
     BEGIN
         RETURN (SELECT COUNT(DISTINCT v.client_id) FROM clients_with_unclaimed_orders v);
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION count_clients_waiting_for_delivery() RETURNS BIGINT AS $$
     BEGIN
         RETURN (SELECT COUNT(DISTINCT v.client_id) FROM clients_waiting_for_delivery v);
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION count_clients_waiting_for_delivery_by_type(p_type TEXT)
     RETURNS BIGINT AS $$
     BEGIN
         RETURN (SELECT COUNT(DISTINCT v.client_id)
                 FROM clients_waiting_for_delivery v
                 WHERE v.medication_type = p_type);
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_single_medicine_details(p_name TEXT)
     RETURNS TABLE(medicine_id INTEGER, medicine_name TEXT, medicine_type TEXT,
                   preparation_description TEXT, component_name TEXT,
                   component_amount NUMERIC, component_unit_of_measure TEXT,
                   component_price NUMERIC, current_stock_amount NUMERIC) AS $$
     BEGIN
         RETURN QUERY
         SELECT v.medicine_id, v.medicine_name, v.medicine_type, v.preparation_description,
                v.component_name, v.component_amount, v.component_unit_of_measure,
                v.component_price, v.current_stock_amount
         FROM medicine_details_view v
         WHERE v.medicine_name = p_name;
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_top_10_medications()
     RETURNS TABLE(medication_id INTEGER, medication_name TEXT, order_count BIGINT) AS $$
     BEGIN
         RETURN QUERY
         SELECT b.id, b.name, COUNT(o.id)
         FROM medicine_order o
         JOIN prescription p ON p.id = o.prescription_id
         JOIN medication b ON b.id = p.medicine_id
         GROUP BY b.id, b.name
         ORDER BY COUNT(o.id) DESC
         LIMIT 10;
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_top_10_medications_by_type(p_type TEXT)
     RETURNS TABLE(medication_id INTEGER, medication_name TEXT, order_count BIGINT) AS $$
     BEGIN
         RETURN QUERY
         SELECT b.id, b.name, COUNT(o.id)
         FROM medicine_order o
         JOIN prescription p ON p.id = o.prescription_id
         JOIN medicine mc ON mc.id = p.medicine_id
         JOIN medication b ON b.id = mc.id
         WHERE mc.type = p_type
         GROUP BY b.id, b.name
         ORDER BY COUNT(o.id) DESC
         LIMIT 10;
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_ingredient_usage_volume(p_name TEXT, p_start DATE, p_end DATE)
     RETURNS TABLE(ingredient_name TEXT, unit_of_measure TEXT, total_amount_used NUMERIC) AS $$
     BEGIN
         RETURN QUERY
         SELECT ib.name, ib.unit_of_measure, COALESCE(SUM(co.amount * p.amount), 0)
         FROM medicine_order o
         JOIN prescription p ON p.id = o.prescription_id
         JOIN composition co ON co.medicine_id = p.medicine_id
         JOIN medication ib ON ib.id = co.ingredient_id
         WHERE ib.name = p_name
           AND o.start_date::date BETWEEN p_start AND p_end
         GROUP BY ib.name, ib.unit_of_measure;
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_clients_by_medication_name_and_period(
         p_name TEXT, p_start DATE, p_end DATE)
     RETURNS TABLE(client_id INTEGER, surname TEXT, name TEXT, patronymic TEXT,
                   phone_number TEXT, order_number INTEGER,
                   expected_date_of_issue TIMESTAMPTZ, medication_name TEXT,
                   medication_type TEXT) AS $$
     BEGIN
         RETURN QUERY
         SELECT c.id, c.surname, c.name, c.patronymic, c.phone_number, o.order_number,
                o.expected_date_of_issue, b.name, mc.type
         FROM medicine_order o
         JOIN client c ON c.id = o.client_id
         JOIN prescription p ON p.id = o.prescription_id
         JOIN medicine mc ON mc.id = p.medicine_id
         JOIN medication b ON b.id = mc.id
         WHERE b.name = p_name
           AND o.start_date::date BETWEEN p_start AND p_end;
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_clients_by_medication_type_and_period(
         p_type TEXT, p_start DATE, p_end DATE)
     RETURNS TABLE(client_id INTEGER, surname TEXT, name TEXT, patronymic TEXT,
                   phone_number TEXT, order_number INTEGER,
                   expected_date_of_issue TIMESTAMPTZ, medication_name TEXT,
                   medication_type TEXT) AS $$
     BEGIN
         RETURN QUERY
         SELECT c.id, c.surname, c.name, c.patronymic, c.phone_number, o.order_number,
                o.expected_date_of_issue, b.name, mc.type
         FROM medicine_order o
         JOIN client c ON c.id = o.client_id
         JOIN prescription p ON p.id = o.prescription_id
         JOIN medicine mc ON mc.id = p.medicine_id
         JOIN medication b ON b.id = mc.id
         WHERE mc.type = p_type
           AND o.start_date::date BETWEEN p_start AND p_end;
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION count_clients_by_medication_name_and_period(
         p_name TEXT, p_start DATE, p_end DATE) RETURNS BIGINT AS $$
     BEGIN
         RETURN (SELECT COUNT(DISTINCT v.client_id)
                 FROM get_clients_by_medication_name_and_period(p_name, p_start, p_end) v);
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION count_clients_by_medication_type_and_period(
         p_type TEXT, p_start DATE, p_end DATE) RETURNS BIGINT AS $$
     BEGIN
         RETURN (SELECT COUNT(DISTINCT v.client_id)
                 FROM get_clients_by_medication_type_and_period(p_type, p_start, p_end) v);
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_medications_at_critical_level()
     RETURNS TABLE(medication_id INTEGER, medication_name TEXT, medication_type TEXT,
                   current_amount NUMERIC, critical_norm NUMERIC) AS $$
     BEGIN
         RETURN QUERY
         SELECT b.id, b.name, COALESCE(mc.type, 'ingredient'), b.current_amount, b.critical_norm
         FROM medication b
         LEFT JOIN medicine mc ON mc.id = b.id
         WHERE b.current_amount <= b.critical_norm;
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_low_stock_medications()
     RETURNS TABLE(medication_id INTEGER, medication_name TEXT, medication_type TEXT,
                   current_amount NUMERIC, critical_norm NUMERIC) AS $$
     BEGIN
         RETURN QUERY
         SELECT b.id, b.name, COALESCE(mc.type, 'ingredient'), b.current_amount, b.critical_norm
         FROM medication b
         LEFT JOIN medicine mc ON mc.id = b.id
         WHERE b.current_amount <= b.critical_norm * 2;
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_low_stock_medications_by_type(p_type TEXT)
     RETURNS TABLE(medication_id INTEGER, medication_name TEXT, medication_type TEXT,
                   current_amount NUMERIC, critical_norm NUMERIC) AS $$
     BEGIN
         RETURN QUERY
         SELECT b.id, b.name, COALESCE(mc.type, 'ingredient'), b.current_amount, b.critical_norm
         FROM medication b
         LEFT JOIN medicine mc ON mc.id = b.id
         WHERE b.current_amount <= b.critical_norm * 2
           AND COALESCE(mc.type, 'ingredient') = p_type;
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_producing_orders()
     RETURNS TABLE(order_id INTEGER, prescription_id INTEGER, client_id INTEGER,
                   order_number INTEGER, expected_date_of_issue TIMESTAMPTZ, status TEXT,
                   date_of_issue DATE, production_time INTEGER, cost NUMERIC) AS $$
     BEGIN
         RETURN QUERY
         SELECT o.id, o.prescription_id, o.client_id, o.order_number,
                o.expected_date_of_issue, o.status, o.date_of_issue,
                t.preparation_time, o.cost
         FROM medicine_order o
         JOIN prescription p ON p.id = o.prescription_id
         JOIN medicine mc ON mc.id = p.medicine_id
         LEFT JOIN technology_of_preparation t ON t.id = mc.tech_prep_id
         WHERE o.status = 'producing';
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION count_producing_orders() RETURNS BIGINT AS $$
     BEGIN
         RETURN (SELECT COUNT(*) FROM medicine_order o WHERE o.status = 'producing');
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_ingredients_for_producing_orders()
     RETURNS TABLE(ingredient_id INTEGER, ingredient_name TEXT,
                   total_required_amount NUMERIC, unit_of_measure TEXT) AS $$
     BEGIN
         RETURN QUERY
         SELECT i.id, ib.name, SUM(co.amount * p.amount), ib.unit_of_measure
         FROM medicine_order o
         JOIN prescription p ON p.id = o.prescription_id
         JOIN composition co ON co.medicine_id = p.medicine_id
         JOIN ingredient i ON i.id = co.ingredient_id
         JOIN medication ib ON ib.id = i.id
         WHERE o.status = 'producing'
         GROUP BY i.id, ib.name, ib.unit_of_measure;
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION count_ingredients_for_producing_orders() RETURNS BIGINT AS $$
     BEGIN
         RETURN (SELECT COUNT(*) FROM get_ingredients_for_producing_orders());
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_technology_of_preparation(
         p_type TEXT, p_names TEXT[], p_from_producing BOOLEAN)
     RETURNS TABLE(tech_id INTEGER, tech_description TEXT, medicine_name TEXT,
                   medicine_type TEXT) AS $$
     BEGIN
         RETURN QUERY
         SELECT t.id, t.description, b.name, mc.type
         FROM technology_of_preparation t
         JOIN medicine mc ON mc.tech_prep_id = t.id
         JOIN medication b ON b.id = mc.id
         WHERE (p_type IS NULL OR mc.type = p_type)
           AND (p_names IS NULL OR b.name = ANY(p_names))
           AND (NOT p_from_producing OR EXISTS (
                    SELECT 1
                    FROM medicine_order o
                    JOIN prescription p ON p.id = o.prescription_id
                    WHERE p.medicine_id = mc.id AND o.status = 'producing'));
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_medicine_price_and_components_info(p_name TEXT)
     RETURNS TABLE(medicine_name TEXT, medicine_price NUMERIC, component_name TEXT,
                   required_component_amount NUMERIC, component_unit_of_measure TEXT,
                   component_price NUMERIC) AS $$
     BEGIN
         RETURN QUERY
         SELECT b.name, b.price, ib.name, co.amount, ib.unit_of_measure, ib.price
         FROM medicine mc
         JOIN medication b ON b.id = mc.id
         LEFT JOIN composition co ON co.medicine_id = mc.id
         LEFT JOIN medication ib ON ib.id = co.ingredient_id
         WHERE b.name = p_name;
     END;
     $$ LANGUAGE plpgsql STABLE",
    "CREATE OR REPLACE FUNCTION get_most_frequent_clients(
         p_type TEXT, p_names TEXT[], p_limit INTEGER)
     RETURNS TABLE(client_id INTEGER, client_surname TEXT, client_name TEXT,
                   client_patronymic TEXT, total_orders BIGINT) AS $$
     BEGIN
         RETURN QUERY
         SELECT c.id, c.surname, c.name, c.patronymic, COUNT(o.id)
         FROM medicine_order o
         JOIN client c ON c.id = o.client_id
         JOIN prescription p ON p.id = o.prescription_id
         JOIN medicine mc ON mc.id = p.medicine_id
         JOIN medication b ON b.id = mc.id
         WHERE (p_type IS NULL OR mc.type = p_type)
           AND (p_names IS NULL OR b.name = ANY(p_names))
         GROUP BY c.id, c.surname, c.name, c.patronymic
         ORDER BY COUNT(o.id) DESC
         LIMIT p_limit;
     END;
     $$ LANGUAGE plpgsql STABLE",
];

pub async fn init_schema(pool: &PgPool) -> Result<()> {
    for query in TABLE_QUERIES {
        sqlx::query(query).execute(pool).await.context("Failed to create table")?;
    }
    for query in TRIGGER_QUERIES {
        sqlx::query(query).execute(pool).await.context("Failed to create trigger")?;
    }
    for query in VIEW_QUERIES {
        sqlx::query(query).execute(pool).await.context("Failed to create view")?;
    }
    for query in FUNCTION_QUERIES {
        sqlx::query(query).execute(pool).await.context("Failed to create function")?;
    }

    log::info!("Database schema is up to date");
    Ok(())
}

/// Один SQL-оператор по многим наборам параметров в одной транзакции;
/// при любой ошибке вся пачка откатывается.
pub async fn execute_batch(
    pool: &PgPool,
    statement: &str,
    param_sets: Vec<PgArguments>,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for args in param_sets {
        sqlx::query_with(statement, args).execute(&mut *tx).await?;
    }
    tx.commit().await
}

/// Стартовые данные; применяются только к пустой базе.
pub async fn seed_if_empty(pool: &PgPool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medication")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    log::info!("Empty database, seeding reference data");

    let mut mixture_tech = Technology {
        id: None,
        description: "Dissolve the dry components in warm water, stir until clear, filter."
            .to_string(),
        preparation_time: 1,
    };
    mixture_tech.save(pool).await?;

    let mut ointment_tech = Technology {
        id: None,
        description: "Grind the active component, mix into the vaseline base in three steps."
            .to_string(),
        preparation_time: 2,
    };
    ointment_tech.save(pool).await?;

    let mut salicylic_acid = Ingredient {
        medication: seed_medication("Salicylic acid", "Chemline", "50.0", 730, "g", "2.10", "300.0")?,
        type_: "active substance".to_string(),
        caution: Some("irritant in high concentrations".to_string()),
        incompatibility: None,
    };
    salicylic_acid.save(pool).await?;

    let mut vaseline = Ingredient {
        medication: seed_medication("Vaseline", "Chemline", "100.0", 1095, "g", "0.30", "800.0")?,
        type_: "ointment base".to_string(),
        caution: None,
        incompatibility: None,
    };
    vaseline.save(pool).await?;

    let mut sodium_bromide = Ingredient {
        medication: seed_medication("Sodium bromide", "Pharmchem", "40.0", 365, "g", "1.50", "150.0")?,
        type_: "active substance".to_string(),
        caution: None,
        incompatibility: Some("acidic solutions".to_string()),
    };
    sodium_bromide.save(pool).await?;

    let mut salicylic_ointment = Medicine {
        medication: seed_medication("Salicylic ointment 2%", "in-house", "10.0", 60, "g", "4.20", "25.0")?,
        type_: "manufactured".to_string(),
        kind: "ointment".to_string(),
        application: "external".to_string(),
        tech_prep_id: ointment_tech.id,
    };
    salicylic_ointment.save(pool).await?;

    let mut calming_mixture = Medicine {
        medication: seed_medication("Calming mixture", "in-house", "5.0", 14, "ml", "6.50", "12.0")?,
        type_: "manufactured".to_string(),
        kind: "mixture".to_string(),
        application: "internal".to_string(),
        tech_prep_id: mixture_tech.id,
    };
    calming_mixture.save(pool).await?;

    let mut aspirin = Medicine {
        medication: seed_medication("Aspirin", "Bayer", "30.0", 1460, "pc", "3.50", "120.0")?,
        type_: "finished".to_string(),
        kind: "pills".to_string(),
        application: "internal".to_string(),
        tech_prep_id: None,
    };
    aspirin.save(pool).await?;

    let compositions = [
        (salicylic_ointment.medication.id, salicylic_acid.medication.id, "2.0"),
        (salicylic_ointment.medication.id, vaseline.medication.id, "98.0"),
        (calming_mixture.medication.id, sodium_bromide.medication.id, "6.0"),
    ];
    let mut param_sets = Vec::new();
    for (medicine_id, ingredient_id, amount) in compositions {
        let (Some(medicine_id), Some(ingredient_id)) = (medicine_id, ingredient_id) else {
            continue;
        };
        let mut args = PgArguments::default();
        args.add(medicine_id);
        args.add(ingredient_id);
        args.add(seed_decimal(amount)?);
        param_sets.push(args);
    }
    execute_batch(
        pool,
        "INSERT INTO composition (medicine_id, ingredient_id, amount)
         VALUES ($1, $2, $3)
         ON CONFLICT (medicine_id, ingredient_id) DO UPDATE SET amount = EXCLUDED.amount",
        param_sets,
    )
    .await?;

    let mut first_client = Client {
        id: None,
        surname: "Ivanov".to_string(),
        name: "Ivan".to_string(),
        patronymic: Some("Petrovich".to_string()),
        phone_number: "+7-900-123-45-67".to_string(),
    };
    first_client.save(pool).await?;

    // Проверка, что состав лёг корректно
    let seeded = Composition::get_all(pool).await?;
    log::info!("Seeded {} composition rows", seeded.len());

    Ok(())
}

fn seed_medication(
    name: &str,
    manufacturer: &str,
    critical_norm: &str,
    shelf_life: i32,
    unit: &str,
    price: &str,
    current_amount: &str,
) -> Result<Medication> {
    Ok(Medication {
        id: None,
        name: name.to_string(),
        manufacturer: manufacturer.to_string(),
        critical_norm: seed_decimal(critical_norm)?,
        shelf_life,
        unit_of_measure: unit.to_string(),
        units_per_package: 1,
        price: seed_decimal(price)?,
        storage_conditions: None,
        current_amount: seed_decimal(current_amount)?,
    })
}

fn seed_decimal(value: &str) -> Result<Decimal> {
    value
        .parse::<Decimal>()
        .with_context(|| format!("Bad seed amount literal '{}'", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_decimal_rejects_bad_literal() {
        assert_eq!(seed_decimal("2.0").unwrap(), Decimal::new(20, 1));
        assert!(seed_decimal("two grams").is_err());
        assert!(seed_decimal("").is_err());
    }

    // Поставка, заведённая без даты и закрытая через UPDATE, обязана
    // пополнять склад так же, как вставка с датой
    #[test]
    fn test_delivery_trigger_fires_on_update() {
        let ddl = TRIGGER_QUERIES.join("\n");
        assert!(ddl.contains("AFTER INSERT OR UPDATE ON medication_delivery"));
        assert!(ddl.contains("OLD.delivery_date IS NULL"));
    }
}
