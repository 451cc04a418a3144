use encounters::clause::{
    Combinator, Comparator, Compare, In, Insert, Order, Ordering, Page, Raw, Select, TextSearch,
    WhereClause,
};
use encounters::{DbError, DbResult, FromRow, Query, RowExt, TracedClient};
use tokio_postgres::{NoTls, Row};

#[derive(Debug, PartialEq)]
struct City {
    id: i32,
    name: String,
    state: i32,
}

impl FromRow for City {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
            state: row.try_get_column("state")?,
        })
    }
}

async fn connect() -> DbResult<Option<tokio_postgres::Client>> {
    dotenvy::dotenv().ok();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping");
            return Ok(None);
        }
    };

    let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
        .await
        .map_err(DbError::from_db_error)?;
    tokio::spawn(async move {
        let _ = connection.await;
    });
    Ok(Some(client))
}

async fn seed(client: &tokio_postgres::Client) -> DbResult<()> {
    client
        .batch_execute(
            "CREATE TEMPORARY TABLE city (id INTEGER PRIMARY KEY, name TEXT NOT NULL, state INTEGER NOT NULL);
             INSERT INTO city VALUES (1, 'Austin', 44), (2, 'Portland', 38), (3, 'Portland', 20), (4, 'Houston', 44);",
        )
        .await
        .map_err(DbError::from_db_error)
}

fn city_query(states: Vec<i32>, term: &str, page: Page) -> Query {
    Query::new()
        .with(Select::new("city", ["id", "name", "state"]))
        .with(
            WhereClause::new(Combinator::And)
                .with(In::new("state", states))
                .with(TextSearch::new("name", term)),
        )
        .with(Order::new(Ordering::Ascending, ["name", "state"]))
        .with(page)
}

#[tokio::test]
async fn filters_and_pages_against_postgres() -> DbResult<()> {
    let Some(client) = connect().await? else {
        return Ok(());
    };
    seed(&client).await?;
    let client = TracedClient::new(client);

    let all: Vec<City> = city_query(vec![], "", Page::new(0, 0)).fetch_all(&client).await?;
    let names: Vec<&str> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Austin", "Houston", "Portland", "Portland"]);
    assert_eq!(all[2].state, 20);

    let texas: Vec<City> = city_query(vec![44], "", Page::new(0, 0)).fetch_all(&client).await?;
    assert_eq!(texas.iter().map(|c| c.id).collect::<Vec<_>>(), [1, 4]);

    let search: Vec<City> = city_query(vec![], "port", Page::new(1, 1)).fetch_all(&client).await?;
    assert_eq!(
        search,
        [City {
            id: 2,
            name: "Portland".to_string(),
            state: 38,
        }]
    );
    Ok(())
}

#[tokio::test]
async fn fetch_one_reports_missing_rows() -> DbResult<()> {
    let Some(client) = connect().await? else {
        return Ok(());
    };
    seed(&client).await?;

    let by_id = |id: i32| {
        Query::new()
            .with(Select::new("city", ["id", "name", "state"]))
            .with(WhereClause::new(Combinator::And).with(Compare::new(Comparator::Equal, "id", id)))
    };

    let austin: City = by_id(1).fetch_one(&client).await?;
    assert_eq!(austin.name, "Austin");

    let missing = by_id(99).fetch_one::<City>(&client).await;
    assert!(matches!(missing, Err(DbError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn transaction_commits_and_rolls_back() -> DbResult<()> {
    let Some(mut client) = connect().await? else {
        return Ok(());
    };
    seed(&client).await?;

    let copied: Vec<i32> = encounters::transaction!(&mut client, tx, {
        Query::new()
            .with(Raw::new(
                "CREATE TEMPORARY TABLE filtered (id INTEGER PRIMARY KEY NOT NULL) ON COMMIT DROP",
            ))
            .execute(&tx)
            .await?;
        Query::new()
            .with(Insert::new("filtered"))
            .with(Select::new("city", ["id"]))
            .with(WhereClause::new(Combinator::And).with(In::new("state", [44i32])))
            .execute(&tx)
            .await?;
        Query::new()
            .with(Raw::new("SELECT id FROM filtered ORDER BY id"))
            .fetch_all(&tx)
            .await
    })?;
    assert_eq!(copied, [1, 4]);

    let failed: DbResult<()> = encounters::transaction!(&mut client, tx, {
        Query::new()
            .with(Raw::new("DELETE FROM city"))
            .execute(&tx)
            .await?;
        Err(DbError::Other("abort".to_string()))
    });
    assert!(matches!(failed, Err(DbError::Other(_))));

    let remaining: Vec<i64> = Query::new()
        .with(Raw::new("SELECT COUNT(1) FROM city"))
        .fetch_all(&client)
        .await?;
    assert_eq!(remaining, [4]);
    Ok(())
}
