use beanmock_generate::{RandomSource, SystemClock, TypeValueRegistry};

fn main() {
    let registry = TypeValueRegistry::new(&mut RandomSource::from_entropy(), &SystemClock);
    for id in registry.type_ids() {
        println!("{id}");
    }
}
