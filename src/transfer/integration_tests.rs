//! Integration Tests for concurrent transfers
//!
//! Random workloads executed from many threads against the in-memory
//! stores, checked against a sequential replay of the ledger.

#[cfg(test)]
mod integration_tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    use rand::Rng;
    use rust_decimal::Decimal;

    use crate::account::{AccountRegistry, AccountStore};
    use crate::core_types::AccountId;
    use crate::transfer::coordinator::TransferCoordinator;
    use crate::transfer::ledger::{TransferLedger, TransferStore};
    use crate::transfer::state::TransferStatus;
    use crate::transfer::types::{Transfer, TransferRequest};

    struct TestHarness {
        coordinator: Arc<TransferCoordinator>,
        accounts: Arc<AccountRegistry>,
        transfers: Arc<TransferLedger>,
        initial: HashMap<AccountId, Decimal>,
    }

    impl TestHarness {
        /// `count` accounts with random balances in `0..max_balance`
        fn with_random_accounts(count: usize, max_balance: i64) -> Self {
            let accounts = Arc::new(AccountRegistry::new());
            let transfers = Arc::new(TransferLedger::new());
            let coordinator = Arc::new(TransferCoordinator::new(
                accounts.clone(),
                transfers.clone(),
            ));

            let mut rng = rand::thread_rng();
            let initial = (0..count)
                .map(|_| {
                    let balance = Decimal::from(rng.gen_range(0..max_balance));
                    (accounts.create(balance), balance)
                })
                .collect();

            Self {
                coordinator,
                accounts,
                transfers,
                initial,
            }
        }

        fn random_requests(&self, count: usize, max_amount: i64) -> Vec<TransferRequest> {
            let ids: Vec<&AccountId> = self.initial.keys().collect();
            let mut rng = rand::thread_rng();

            (0..count)
                .map(|_| {
                    let src = rng.gen_range(0..ids.len());
                    let mut dst = rng.gen_range(0..ids.len() - 1);
                    if dst >= src {
                        dst += 1;
                    }
                    let amount = Decimal::from(rng.gen_range(1..max_amount));
                    TransferRequest::new(ids[src].clone(), ids[dst].clone(), amount)
                })
                .collect()
        }

        /// Run every request on its own thread after a small random delay
        fn apply_concurrently(&self, requests: Vec<TransferRequest>) {
            let handles: Vec<_> = requests
                .into_iter()
                .map(|req| {
                    let coordinator = Arc::clone(&self.coordinator);
                    thread::spawn(move || {
                        let delay = rand::thread_rng().gen_range(0..10);
                        thread::sleep(Duration::from_millis(delay));
                        let _ = coordinator.execute(req);
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        }

        fn final_balances(&self) -> HashMap<AccountId, Decimal> {
            self.accounts
                .all()
                .into_iter()
                .map(|a| (a.id, a.balance))
                .collect()
        }
    }

    /// Replay ACCEPTED transfers in timestamp order against initial balances
    fn replay(
        initial: &HashMap<AccountId, Decimal>,
        log: &[Transfer],
    ) -> HashMap<AccountId, Decimal> {
        let mut accepted: Vec<&Transfer> = log
            .iter()
            .filter(|t| t.status == TransferStatus::Accepted)
            .collect();
        accepted.sort_by_key(|t| t.timestamp);

        let mut balances = initial.clone();
        for t in accepted {
            *balances.get_mut(&t.source_account_id).unwrap() -= t.amount;
            *balances.get_mut(&t.destination_account_id).unwrap() += t.amount;
        }
        balances
    }

    #[test]
    fn test_concurrent_matches_sequential_replay() {
        let harness = TestHarness::with_random_accounts(10, 100);
        let requests = harness.random_requests(100, 100);

        harness.apply_concurrently(requests);

        let log = harness.transfers.all();
        assert_eq!(log.len(), 100);
        assert!(log.iter().all(|t| t.status.is_terminal()));
        assert_eq!(harness.final_balances(), replay(&harness.initial, &log));
    }

    #[test]
    fn test_balances_stay_non_negative() {
        let harness = TestHarness::with_random_accounts(10, 100);
        let requests = harness.random_requests(200, 100);

        // Observe the registry while transfers are in flight
        let done = Arc::new(AtomicBool::new(false));
        let observer = {
            let accounts = Arc::clone(&harness.accounts);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut snapshots = 0usize;
                while !done.load(Ordering::Acquire) {
                    let all = accounts.all();
                    assert!(all.iter().all(|a| a.balance >= Decimal::ZERO));
                    snapshots += 1;
                }
                snapshots
            })
        };

        harness.apply_concurrently(requests);
        done.store(true, Ordering::Release);
        assert!(observer.join().unwrap() > 0);

        assert!(
            harness
                .accounts
                .all()
                .iter()
                .all(|a| a.balance >= Decimal::ZERO)
        );
    }

    #[test]
    fn test_total_balance_is_conserved() {
        let harness = TestHarness::with_random_accounts(8, 50);
        let before = harness.accounts.total_balance().unwrap();

        let mut requests = harness.random_requests(150, 60);
        // Mix in requests that must fail on the credit leg
        let some_source = harness.initial.keys().next().unwrap().clone();
        for _ in 0..20 {
            requests.push(TransferRequest::new(
                some_source.clone(),
                "missing-destination",
                Decimal::ONE,
            ));
        }

        harness.apply_concurrently(requests);

        assert_eq!(harness.accounts.total_balance(), Some(before));
        assert_eq!(harness.transfers.len(), 170);

        let refunded = harness
            .transfers
            .all()
            .into_iter()
            .filter(|t| t.destination_account_id == "missing-destination")
            .all(|t| t.status == TransferStatus::Rejected);
        assert!(refunded);
    }

    #[test]
    fn test_total_includes_newly_created_accounts() {
        let harness = TestHarness::with_random_accounts(5, 100);
        let before = harness.accounts.total_balance().unwrap();
        let requests = harness.random_requests(50, 40);

        let creator = {
            let accounts = Arc::clone(&harness.accounts);
            thread::spawn(move || {
                for _ in 0..10 {
                    accounts.create(Decimal::from(7));
                }
            })
        };
        harness.apply_concurrently(requests);
        creator.join().unwrap();

        assert_eq!(
            harness.accounts.total_balance(),
            Some(before + Decimal::from(70))
        );
    }

    #[test]
    fn test_contended_source_never_overdraws() {
        let accounts = Arc::new(AccountRegistry::new());
        let transfers = Arc::new(TransferLedger::new());
        let coordinator = Arc::new(TransferCoordinator::new(
            accounts.clone(),
            transfers.clone(),
        ));

        let src = accounts.create(Decimal::from(10));
        let dst = accounts.create(Decimal::ZERO);

        let handles: Vec<_> = (0..40)
            .map(|_| {
                let coordinator = Arc::clone(&coordinator);
                let req = TransferRequest::new(src.clone(), dst.clone(), Decimal::ONE);
                thread::spawn(move || coordinator.execute(req).is_ok())
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 10);
        assert_eq!(accounts.find(&src).unwrap().balance, Decimal::ZERO);
        assert_eq!(accounts.find(&dst).unwrap().balance, Decimal::from(10));

        let rejected: Vec<_> = transfers
            .all()
            .into_iter()
            .filter(|t| t.status == TransferStatus::Rejected)
            .collect();
        assert_eq!(rejected.len(), 30);
        assert!(rejected.iter().all(|t| t.comment == "InsufficientFunds"));
    }
}
