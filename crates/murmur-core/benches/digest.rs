use criterion::{black_box, criterion_group, criterion_main, Criterion};
use murmur_core::{
    derive_author_digest, derive_ticket, PostId, RequestContext, SecretKey, SecurityContext,
    SECRET_KEY_LEN,
};

fn bench_derivations(c: &mut Criterion) {
    let key = SecretKey::from_bytes(vec![0x5a; SECRET_KEY_LEN]);
    let user_agent = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

    c.bench_function("derive_author_digest", |b| {
        b.iter(|| derive_author_digest(&key, black_box("203.0.113.7"), black_box(PostId::new(42))))
    });

    c.bench_function("derive_ticket", |b| {
        b.iter(|| derive_ticket(&key, black_box("203.0.113.7"), black_box(user_agent)))
    });

    let keys = SecurityContext::new(
        SecretKey::from_bytes(vec![0x5a; SECRET_KEY_LEN]),
        SecretKey::from_bytes(vec![0xa5; SECRET_KEY_LEN]),
    );
    let ctx = RequestContext::new("203.0.113.7", user_agent);
    let submitted = keys.ticket(&ctx).to_base64();

    c.bench_function("verify_ticket", |b| {
        b.iter(|| keys.verify_ticket(black_box(&ctx), black_box(&submitted)))
    });
}

criterion_group!(benches, bench_derivations);
criterion_main!(benches);
