use catalog_store::{
    ActorId, ActorRow, BattleId, BattleRow, CatalogStore, CharacterId, CharacterRow,
    InMemoryCatalogStore,
};
use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use views::ViewAssembler;

/// Populate a store with N battles, each with 4 characters played by 2 actors.
async fn populate_store(store: &InMemoryCatalogStore, n: i64) {
    let date = NaiveDate::from_ymd_opt(2010, 9, 26).unwrap();
    for battle in 1..=n {
        store
            .insert_battle(BattleRow::new(battle, format!("Battle {battle}"), 150, date))
            .await;
        for slot in 0..4 {
            let character = battle * 10 + slot;
            store
                .insert_character(CharacterRow::new(character, format!("Character {character}")))
                .await;
            for role in 0..2 {
                let actor = character * 10 + role;
                store
                    .insert_actor(ActorRow::new(actor, format!("Actor {actor}")))
                    .await;
                store
                    .add_portrayal(
                        ActorId::from(actor),
                        CharacterId::from(character),
                        BattleId::from(battle),
                    )
                    .await
                    .unwrap();
            }
        }
    }
}

fn bench_assemble_single_battle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryCatalogStore::new();
    rt.block_on(populate_store(&store, 1));

    let assembler = ViewAssembler::new(store.clone());
    let battle = rt
        .block_on(store.battle_by_id(BattleId::from(1)))
        .unwrap()
        .unwrap();

    c.bench_function("views/assemble_single_battle", |b| {
        b.iter(|| {
            rt.block_on(async {
                assembler.assemble_battle_view(&battle).await.unwrap();
            });
        });
    });
}

fn bench_assemble_100_battles(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryCatalogStore::new();
    rt.block_on(populate_store(&store, 100));

    let assembler = ViewAssembler::new(store.clone());
    let battles = rt.block_on(store.all_battles()).unwrap();

    c.bench_function("views/assemble_100_battles", |b| {
        b.iter(|| {
            rt.block_on(async {
                for battle in &battles {
                    assembler.assemble_battle_view(battle).await.unwrap();
                }
            });
        });
    });
}

criterion_group!(
    benches,
    bench_assemble_single_battle,
    bench_assemble_100_battles
);
criterion_main!(benches);
