use log::{error, info};
use treap_map::TreapMap;

fn main() {
    if std::env::var("TREAP_LOG").is_ok() {
        let env = env_logger::Env::new()
            .filter("TREAP_LOG")
            .write_style("TREAP_LOG_STYLE");
        env_logger::init_from_env(env);
    }

    let mut map = TreapMap::new();
    for (key, value) in &[("c", 3), ("a", 1), ("b", 2), ("d", 4)] {
        map.insert(*key, *value);
    }
    info!("built treap with {} keys", map.len());
    println!("{}", map);

    if let Err(err) = map.remove(&"b") {
        error!("failed to remove key: {}", err);
    }
    println!("{}", map);

    let reversed = map.keys().rev().cloned().collect::<Vec<_>>();
    println!("{:?}", reversed);

    let (left, right) = map.split(&"b");
    println!("{} {}", left, right);
    match TreapMap::merge(left, right) {
        Ok(map) => println!("{}", map),
        Err(err) => error!("failed to merge treaps: {}", err),
    }
}
