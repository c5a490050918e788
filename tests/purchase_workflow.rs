//! Integration tests for the ticket purchase workflow.
//!
//! These tests drive `PurchaseTicketHandler` against real flat-file stores in a
//! temporary data directory and check what ends up on disk.

use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;

use box_office::adapters::{Catalog, CatalogLoader};
use box_office::application::{
    CommitGate, PurchaseTicketCommand, PurchaseTicketHandler, QuoteDiscountHandler,
    QuoteDiscountQuery, RemoveClientCommand, RemoveClientHandler, RemoveMovieCommand,
    RemoveMovieHandler, RemoveRoomCommand, RemoveRoomHandler,
};
use box_office::domain::foundation::{
    ClientId, DiscountPercent, ErrorCode, ErrorKind, MovieId, Repository, RoomId, SessionId,
};
use box_office::domain::loyalty::{
    DiscountPolicy, LoyaltyRules, LoyaltyTier, NoDiscount, TieredDiscountPolicy,
};
use box_office::domain::ticket::PurchaseError;
use box_office::ports::TicketRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn seed(dir: &Path, capacity: u32) {
    std::fs::write(dir.join("rooms.txt"), format!("1;{}\n", capacity)).unwrap();
    std::fs::write(dir.join("movies.txt"), "1;Alien;Sci-fi;117;14;\n").unwrap();
    std::fs::write(
        dir.join("sessions.txt"),
        format!("1;11-06-2025;19:30;1;1;20.00;{}\n", capacity),
    )
    .unwrap();
    std::fs::write(
        dir.join("clients.txt"),
        "1;Helena;helena@example.com;111.111.111-11;14-03-1990\n\
         2;Marcos;marcos@example.com;222.222.222-22;02-09-1985\n",
    )
    .unwrap();
    std::fs::write(dir.join("tickets.txt"), "").unwrap();
}

async fn load(dir: &Path) -> Catalog {
    let (catalog, _) = CatalogLoader::new(dir, LoyaltyRules::default())
        .load()
        .await
        .unwrap();
    catalog
}

fn handler(catalog: &Catalog, policy: Arc<dyn DiscountPolicy>) -> PurchaseTicketHandler {
    PurchaseTicketHandler::new(
        catalog.clients.clone(),
        catalog.sessions.clone(),
        catalog.tickets.clone(),
        policy,
        LoyaltyRules::default(),
        CommitGate::new(),
    )
}

fn buy(client: u32, payment: &str) -> PurchaseTicketCommand {
    PurchaseTicketCommand {
        client_id: ClientId::try_new(client).unwrap(),
        session_id: SessionId::try_new(1).unwrap(),
        payment_method: payment.to_string(),
    }
}

fn money(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn available(catalog: &Catalog) -> u32 {
    catalog
        .sessions
        .find_by_id(SessionId::try_new(1).unwrap())
        .await
        .unwrap()
        .unwrap()
        .available_seats()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn two_seat_room_sells_out_after_two_purchases() {
    let dir = TempDir::new().unwrap();
    seed(dir.path(), 2);
    let catalog = load(dir.path()).await;
    let policy = TieredDiscountPolicy::new(vec![LoyaltyTier::new(
        1,
        DiscountPercent::try_new(10).unwrap(),
    )])
    .unwrap();
    let purchases = handler(&catalog, Arc::new(policy));

    // First purchase: client has no points, no discount
    let first = purchases.handle(buy(1, "CREDIT_CARD")).await.unwrap();
    assert_eq!(first.ticket.final_price(), money("20.00"));
    assert_eq!(available(&catalog).await, 1);

    // Second purchase by the same client: one point unlocks 10%
    let second = purchases.handle(buy(1, "pix")).await.unwrap();
    assert_eq!(second.discount.value(), 10);
    assert_eq!(second.ticket.final_price(), money("18.00"));
    assert_eq!(available(&catalog).await, 0);

    // Third purchase: sold out
    let err = purchases.handle(buy(2, "CASH")).await.unwrap_err();
    assert_eq!(err, PurchaseError::RoomCrowded(SessionId::try_new(1).unwrap()));
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(available(&catalog).await, 0);
    assert_eq!(catalog.tickets.list_all().await.unwrap().len(), 2);

    // Disk agrees with memory
    let tickets = std::fs::read_to_string(dir.path().join("tickets.txt")).unwrap();
    assert_eq!(tickets, "1;1;1;20.00;CREDIT_CARD\n2;1;1;18.00;PIX\n");
    let sessions = std::fs::read_to_string(dir.path().join("sessions.txt")).unwrap();
    assert_eq!(sessions, "1;11-06-2025;19:30;1;1;20.00;0\n");
}

#[tokio::test]
async fn invalid_payment_changes_nothing_on_disk() {
    let dir = TempDir::new().unwrap();
    seed(dir.path(), 5);
    let catalog = load(dir.path()).await;
    let before: Vec<String> = ["sessions.txt", "clients.txt", "tickets.txt"]
        .iter()
        .map(|f| std::fs::read_to_string(dir.path().join(f)).unwrap())
        .collect();

    let err = handler(&catalog, Arc::new(NoDiscount))
        .handle(buy(1, "bitcoin"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    let after: Vec<String> = ["sessions.txt", "clients.txt", "tickets.txt"]
        .iter()
        .map(|f| std::fs::read_to_string(dir.path().join(f)).unwrap())
        .collect();
    assert_eq!(before, after);
    assert_eq!(available(&catalog).await, 5);
}

#[tokio::test]
async fn missing_client_and_session_are_not_found() {
    let dir = TempDir::new().unwrap();
    seed(dir.path(), 5);
    let catalog = load(dir.path()).await;
    let purchases = handler(&catalog, Arc::new(NoDiscount));

    let no_client = purchases.handle(buy(42, "CASH")).await.unwrap_err();
    let no_session = purchases
        .handle(PurchaseTicketCommand {
            client_id: ClientId::try_new(1).unwrap(),
            session_id: SessionId::try_new(42).unwrap(),
            payment_method: "CASH".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(no_client.kind(), ErrorKind::NotFound);
    assert_eq!(no_session.kind(), ErrorKind::NotFound);
    assert!(catalog.tickets.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_session_write_rolls_the_purchase_back() {
    let dir = TempDir::new().unwrap();
    seed(dir.path(), 5);
    let catalog = load(dir.path()).await;
    std::fs::create_dir(dir.path().join("sessions.txt.tmp")).unwrap();

    let err = handler(&catalog, Arc::new(NoDiscount))
        .handle(buy(1, "CASH"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PersistenceFailure);
    assert!(catalog.tickets.list_all().await.unwrap().is_empty());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("tickets.txt")).unwrap(),
        ""
    );
    let client = catalog
        .clients
        .find_by_id(ClientId::try_new(1).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(client.loyalty_points(), 0);
    assert_eq!(available(&catalog).await, 5);
}

#[tokio::test]
async fn concurrent_purchases_never_oversell() {
    let dir = TempDir::new().unwrap();
    seed(dir.path(), 3);
    let catalog = load(dir.path()).await;
    let purchases = Arc::new(handler(&catalog, Arc::new(NoDiscount)));

    let attempts: Vec<_> = (0..8)
        .map(|i| {
            let purchases = purchases.clone();
            tokio::spawn(async move { purchases.handle(buy(1 + i % 2, "CASH")).await })
        })
        .collect();
    let mut sold = 0;
    for attempt in attempts {
        if attempt.await.unwrap().is_ok() {
            sold += 1;
        }
    }

    assert_eq!(sold, 3);
    assert_eq!(available(&catalog).await, 0);
    assert_eq!(
        catalog
            .tickets
            .count_by_session(SessionId::try_new(1).unwrap())
            .await
            .unwrap(),
        3
    );
}

#[tokio::test]
async fn quote_matches_the_price_actually_charged() {
    let dir = TempDir::new().unwrap();
    seed(dir.path(), 5);
    let catalog = load(dir.path()).await;
    let policy: Arc<dyn DiscountPolicy> = Arc::new(
        TieredDiscountPolicy::new(vec![LoyaltyTier::new(
            1,
            DiscountPercent::try_new(25).unwrap(),
        )])
        .unwrap(),
    );
    let gate = CommitGate::new();
    let purchases = PurchaseTicketHandler::new(
        catalog.clients.clone(),
        catalog.sessions.clone(),
        catalog.tickets.clone(),
        policy.clone(),
        LoyaltyRules::default(),
        gate.clone(),
    );
    let quotes = QuoteDiscountHandler::new(
        catalog.clients.clone(),
        catalog.sessions.clone(),
        policy,
        gate,
    );
    purchases.handle(buy(1, "CASH")).await.unwrap();

    let quote = quotes
        .handle(QuoteDiscountQuery {
            client_id: ClientId::try_new(1).unwrap(),
            session_id: SessionId::try_new(1).unwrap(),
        })
        .await
        .unwrap();
    let bought = purchases.handle(buy(1, "CASH")).await.unwrap();

    assert_eq!(quote.final_price, money("15.00"));
    assert_eq!(bought.ticket.final_price(), quote.final_price);
}

#[tokio::test]
async fn referenced_entities_cannot_be_removed_so_sold_seats_survive_reload() {
    let dir = TempDir::new().unwrap();
    seed(dir.path(), 2);
    let catalog = load(dir.path()).await;
    let gate = CommitGate::new();
    let purchases = handler(&catalog, Arc::new(NoDiscount));
    purchases.handle(buy(1, "cash")).await.unwrap();
    purchases.handle(buy(2, "cash")).await.unwrap();

    let err = RemoveClientHandler::new(
        catalog.clients.clone(),
        catalog.tickets.clone(),
        gate.clone(),
    )
    .handle(RemoveClientCommand {
        client_id: ClientId::try_new(1).unwrap(),
    })
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);

    let err = RemoveRoomHandler::new(
        catalog.rooms.clone(),
        catalog.sessions.clone(),
        gate.clone(),
    )
    .handle(RemoveRoomCommand {
        room_id: RoomId::try_new(1).unwrap(),
    })
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);

    let err = RemoveMovieHandler::new(catalog.movies.clone(), catalog.sessions.clone(), gate)
        .handle(RemoveMovieCommand {
            movie_id: MovieId::try_new(1).unwrap(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);

    let (reloaded, report) = CatalogLoader::new(dir.path(), LoyaltyRules::default())
        .load()
        .await
        .unwrap();
    assert_eq!(report.skipped_total(), 0);
    assert_eq!(available(&reloaded).await, 0);
    assert_eq!(reloaded.tickets.list_all().await.unwrap().len(), 2);
}
