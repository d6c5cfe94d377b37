//! Property tests for catalog invariants.
//!
//! Drives the catalog with random operation sequences over a small id
//! space (so collisions, double-borrows, and exhausted books actually
//! happen) and checks after every step that the inventory never drifts:
//! copy counts stay in bounds, borrowed sets agree with on-loan counts,
//! and the ledger's net borrow balance matches live state.

use circdesk::prelude::*;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

#[derive(Debug, Clone)]
enum Op {
    AddBook { id: u64, copies: u32 },
    RemoveBook { id: u64 },
    UpdateCopies { id: u64, total: u32 },
    AddMember { id: u64 },
    RemoveMember { id: u64 },
    Issue { member: u64, book: u64 },
    Return { member: u64, book: u64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // issue/return weighted up so sequences spend most steps transacting
    prop_oneof![
        1 => (1u64..6, 1u32..4).prop_map(|(id, copies)| Op::AddBook { id, copies }),
        1 => (1u64..6).prop_map(|id| Op::RemoveBook { id }),
        1 => (1u64..6, 1u32..4).prop_map(|(id, total)| Op::UpdateCopies { id, total }),
        1 => (1u64..4).prop_map(|id| Op::AddMember { id }),
        1 => (1u64..4).prop_map(|id| Op::RemoveMember { id }),
        3 => (1u64..4, 1u64..6).prop_map(|(member, book)| Op::Issue { member, book }),
        3 => (1u64..4, 1u64..6).prop_map(|(member, book)| Op::Return { member, book }),
    ]
}

/// Apply one op, ignoring rejections: rule violations are expected in
/// random sequences, and a rejected op must leave no trace (which the
/// invariant check after each step verifies).
fn apply(catalog: &mut Catalog, op: Op) {
    let _ = match op {
        Op::AddBook { id, copies } => Book::new(id, format!("book-{id}"), "Some Author", copies)
            .and_then(|b| catalog.add_book(b)),
        Op::RemoveBook { id } => BookId::new(id).and_then(|id| catalog.remove_book(id).map(|_| ())),
        Op::UpdateCopies { id, total } => BookId::new(id).and_then(|id| {
            catalog.update_book(
                id,
                BookUpdate {
                    total_copies: Some(total),
                    ..Default::default()
                },
            )
        }),
        Op::AddMember { id } => {
            Member::new(id, format!("member-{id}")).and_then(|m| catalog.add_member(m))
        }
        Op::RemoveMember { id } => {
            MemberId::new(id).and_then(|id| catalog.remove_member(id).map(|_| ()))
        }
        Op::Issue { member, book } => MemberId::new(member).and_then(|m| {
            BookId::new(book).and_then(|b| catalog.issue_book(m, b).map(|_| ()))
        }),
        Op::Return { member, book } => MemberId::new(member).and_then(|m| {
            BookId::new(book).and_then(|b| catalog.return_book(m, b).map(|_| ()))
        }),
    };
}

fn check_invariants(catalog: &Catalog) -> std::result::Result<(), TestCaseError> {
    for book in catalog.books() {
        // 0 <= available <= total (lower bound by unsigned type)
        prop_assert!(
            book.available_copies() <= book.total_copies(),
            "book {} has {} available of {} total",
            book.id(),
            book.available_copies(),
            book.total_copies()
        );

        // on-loan count agrees with the members' borrowed sets
        let holders = catalog.members().filter(|m| m.holds(book.id())).count();
        prop_assert_eq!(book.on_loan() as usize, holders);

        // ledger net borrow balance agrees with live state
        let records = catalog.history(HistoryFilter::book(book.id()));
        let borrows = records.iter().filter(|r| r.action == TxAction::Borrow).count();
        let returns = records.iter().filter(|r| r.action == TxAction::Return).count();
        prop_assert_eq!(borrows - returns, book.on_loan() as usize);
    }

    for member in catalog.members() {
        prop_assert!(member.borrowed_count() <= catalog.borrow_limit());
        // every held book still exists in the inventory
        for book_id in member.borrowed() {
            prop_assert!(catalog.book(book_id).is_some());
        }
    }

    // ledger sequence numbers are the append order
    for (i, record) in catalog.ledger().iter().enumerate() {
        prop_assert_eq!(record.seq, i as u64);
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_invariants_hold_after_every_operation(
        ops in proptest::collection::vec(op_strategy(), 1..80),
    ) {
        let mut catalog = Catalog::builder().borrow_limit(2).build();
        for op in ops {
            apply(&mut catalog, op);
            check_invariants(&catalog)?;
        }
    }

    #[test]
    fn test_issue_return_pairs_restore_initial_state(
        copies in 1u32..5,
        rounds in 1usize..10,
    ) {
        let mut catalog = Catalog::new();
        catalog.add_book(Book::new(1, "Dune", "Frank Herbert", copies).unwrap()).unwrap();
        catalog.add_member(Member::new(101, "Alice").unwrap()).unwrap();
        let member = MemberId::new(101).unwrap();
        let book = BookId::new(1).unwrap();

        for _ in 0..rounds {
            catalog.issue_book(member, book).unwrap();
            prop_assert_eq!(catalog.book(book).unwrap().available_copies(), copies - 1);
            catalog.return_book(member, book).unwrap();
            prop_assert_eq!(catalog.book(book).unwrap().available_copies(), copies);
        }
        prop_assert_eq!(catalog.ledger().len(), rounds * 2);
    }
}
