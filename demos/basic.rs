use chirpy_store::filter::ContentFilter;
use chirpy_store::Store;

fn main() -> Result<(), chirpy_store::Error> {
    let path = std::env::temp_dir().join("chirpy_store_example_basic.json");
    let store = Store::builder(&path).pretty(true).build()?;
    store.reset()?;

    // validate + filter before the store ever sees the text
    let filter = ContentFilter::default();
    for body in ["I had something interesting for breakfast", "what a kerfuffle"] {
        let clean = filter.validate_post(body)?;
        let post = store.posts().create(clean)?;
        println!("created {post:?}");
    }
    if let Err(e) = filter.validate_post(&"x".repeat(141)) {
        println!("rejected: {e}");
    }

    store.users().create("a@b.com".into())?;

    println!("posts  = {:?}", store.posts().list()?);
    println!("users  = {:?}", store.users().list()?);
    match store.posts().get(42) {
        Err(e) if e.is_not_found() => println!("lookup: {e}"),
        other => println!("lookup: {other:?}"),
    }

    println!("{}", std::fs::read_to_string(store.path()).unwrap_or_default());

    store.reset()?;
    Ok(())
}
