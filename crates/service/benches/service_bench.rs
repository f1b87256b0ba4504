use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::account::{domain::{BankName, CreateAccountRequest}, AccountService};
use service::identity::Identity;
use service::profile::{domain::{CreateUserProfileRequest, Theme}, ProfileService};
use service::repo::MemoryStore;

fn bench_profile_and_accounts(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::new());
    let profiles = ProfileService::new(store.clone());
    let accounts = AccountService::new(store);
    let me = Identity::new("bench-user");

    // pre-create the profile and two accounts outside of the benchmark
    let rt = tokio::runtime::Runtime::new().unwrap();
    let req = CreateUserProfileRequest {
        default_currency: "KZT".into(),
        timezone: "Asia/Almaty".into(),
        language: "ru".into(),
        theme: Theme::Light,
        ..Default::default()
    };
    rt.block_on(profiles.create(&me, req)).unwrap();
    for bank in [BankName::Kaspi, BankName::Halyk] {
        let req = CreateAccountRequest { bank_name: bank, account_name: "Bench".into(), currency: "KZT".into() };
        rt.block_on(accounts.create(&me, req)).unwrap();
    }

    c.bench_function("profile_get", |b| {
        b.iter(|| rt.block_on(profiles.get(&me)).unwrap());
    });
    c.bench_function("accounts_list", |b| {
        b.iter(|| rt.block_on(accounts.list(&me)).unwrap());
    });
}

criterion_group!(benches, bench_profile_and_accounts);
criterion_main!(benches);
