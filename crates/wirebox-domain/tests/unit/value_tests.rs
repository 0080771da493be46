//! Unit tests for resolved values, deferred handles and arguments

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use wirebox_domain::{Args, DeferredHandle, Error, Instance, Provider, TypeKey};

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct English;
impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

#[test]
fn test_instance_downcast_to_stored_role() {
    let greeter: Arc<dyn Greeter> = Arc::new(English);
    let instance = Instance::of::<dyn Greeter>(Arc::clone(&greeter));

    let resolved = instance.downcast::<dyn Greeter>().expect("stored as dyn Greeter");
    assert!(Arc::ptr_eq(&resolved, &greeter));
    assert_eq!(resolved.greet(), "hello");

    assert!(instance.downcast::<English>().is_none());
    assert!(instance.as_deferred().is_none());
}

#[test]
fn test_deferred_handle_resolves_each_time() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let handle = DeferredHandle::new(TypeKey::of::<String>(), move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Instance::of(Arc::new("value".to_string()))))
    });

    assert_eq!(handle.target(), TypeKey::of::<String>());
    handle.resolve().unwrap();
    handle.resolve().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_provider_get_returns_fresh_values() {
    let provider = Provider::<String>::from_fn(|| Ok(Arc::new("fresh".to_string())));

    let first = provider.get().unwrap();
    let second = provider.get().unwrap();
    assert_eq!(*first, "fresh");
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_provider_get_unresolved() {
    let provider =
        Provider::<String>::new(DeferredHandle::new(TypeKey::of::<String>(), || Ok(None)));

    match provider.get() {
        Err(Error::Unresolved { role }) => assert_eq!(role.inner(), TypeKey::of::<String>()),
        other => panic!("Expected Unresolved error, got {other:?}"),
    }
}

#[test]
fn test_provider_clone_shares_handle() {
    let provider = Provider::<String>::from_fn(|| Ok(Arc::new(String::new())));
    let other = Provider::<String>::from_fn(|| Ok(Arc::new(String::new())));

    assert!(provider.ptr_eq(&provider.clone()));
    assert!(!provider.ptr_eq(&other));
}

#[test]
fn test_args_take_in_order() {
    let mut args = Args::new(vec![
        Instance::of(Arc::new(7_u32)),
        Instance::of::<dyn Greeter>(Arc::new(English)),
    ]);
    assert_eq!(args.remaining(), 2);

    assert_eq!(*args.take::<u32>().unwrap(), 7);
    assert_eq!(args.take::<dyn Greeter>().unwrap().greet(), "hello");
    assert_eq!(args.remaining(), 0);
}

#[test]
fn test_args_take_wrong_type() {
    let mut args = Args::new(vec![Instance::of(Arc::new(7_u32))]);
    match args.take::<String>() {
        Err(Error::TypeMismatch { expected }) => assert_eq!(expected, TypeKey::of::<String>()),
        other => panic!("Expected TypeMismatch error, got {other:?}"),
    }
}

#[test]
fn test_args_take_past_end() {
    let mut args = Args::empty();
    match args.take::<u32>() {
        Err(Error::MissingArgument { expected }) => assert_eq!(expected, TypeKey::of::<u32>()),
        other => panic!("Expected MissingArgument error, got {other:?}"),
    }
}

#[test]
fn test_args_take_provider() {
    let provider = Provider::<u32>::from_fn(|| Ok(Arc::new(3)));
    let mut args = Args::new(vec![Instance::from(provider.clone())]);

    let taken = args.take_provider::<u32>().unwrap();
    assert!(taken.ptr_eq(&provider));
    assert_eq!(*taken.get().unwrap(), 3);
}

#[test]
fn test_args_take_provider_of_other_type() {
    let provider = Provider::<u32>::from_fn(|| Ok(Arc::new(3)));
    let mut args = Args::new(vec![Instance::from(provider)]);

    assert!(matches!(
        args.take_provider::<String>(),
        Err(Error::TypeMismatch { .. })
    ));
}
