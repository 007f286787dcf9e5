use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::service::{AuthService, AuthConfig};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::domain::LoginInput;

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(MockAuthRepository::default());
    let cfg = AuthConfig { jwt_secret: "bench-secret-0123456789".into(), token_ttl: chrono::Duration::hours(1), password_algorithm: "argon2id".into() };
    let svc = AuthService::new(repo, cfg);

    // pre-create the admin outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(svc.bootstrap_admin("bench", "Benchmark1")).unwrap();

    c.bench_function("auth_login", |b| {
        b.iter(|| {
            rt.block_on(svc.login(LoginInput { username: "bench".into(), password: "Benchmark1".into() })).unwrap();
        });
    });

    let session = rt.block_on(svc.login(LoginInput { username: "bench".into(), password: "Benchmark1".into() })).unwrap();
    c.bench_function("auth_verify_token", |b| {
        b.iter(|| svc.verify_token(&session.token).unwrap());
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
