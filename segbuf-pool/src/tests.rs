use super::*;

const INFO: RecordInfo = RecordInfo::new(24, 4, 0, 7);

fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

fn pool(capacity: u32) -> RecordPool {
  init_tracing();
  RecordPool::new(INFO, PoolOptions::new().with_capacity(capacity)).unwrap()
}

#[test]
fn test_record_info_validate() {
  assert!(INFO.validate().is_ok());
  assert_eq!(INFO.words(), 6);

  let bad = [
    RecordInfo::new(0, 0, 4, 1),
    RecordInfo::new(10, 4, 0, 1),
    RecordInfo::new(16, 2, 0, 1),
    RecordInfo::new(16, 16, 0, 1),
    RecordInfo::new(16, 4, 4, 1),
    RecordInfo::new(16, 4, 0, FREE_TAG),
  ];
  for info in bad {
    assert!(matches!(
      info.validate(),
      Err(Error::InvalidRecordInfo(_))
    ));
    assert!(RecordPool::new(info, PoolOptions::new()).is_err());
  }
}

#[test]
fn test_invalid_capacity() {
  for capacity in [0, u32::MAX] {
    let err = RecordPool::new(INFO, PoolOptions::new().with_capacity(capacity)).unwrap_err();
    assert_eq!(err, Error::InvalidCapacity { capacity });
  }
}

#[test]
fn test_handle_sentinel() {
  assert!(Handle::NONE.is_none());
  assert_eq!(Handle::NONE.get(), None);
  assert_eq!(Handle::default(), Handle::NONE);
  assert_eq!(Handle::from(Some(Handle::new(3))), Handle::new(3));
  assert_eq!(Handle::from(None), Handle::NONE);
  assert_eq!(std::format!("{:?}", Handle::NONE), "Handle(NONE)");
  assert_eq!(std::format!("{}", Handle::new(12)), "12");
}

#[test]
fn test_alloc_stamps_tag_and_next() {
  let mut p = pool(4);
  let h = p.alloc().unwrap();
  let words = p.get(h);
  assert_eq!(words.len(), 6);
  assert_eq!(words[0], 7);
  assert_eq!(words[1], Handle::NONE.index());
  assert!(p.is_live(h));
  assert_eq!(p.allocated(), 1);
  assert_eq!(p.remaining(), 3);
}

#[test]
fn test_alloc_until_exhausted() {
  let mut p = pool(3);
  let handles = [p.alloc().unwrap(), p.alloc().unwrap(), p.alloc().unwrap()];
  assert_eq!(p.alloc().unwrap_err(), Error::Exhausted { capacity: 3 });
  assert_eq!(p.materialized(), 3);

  for h in handles {
    p.dealloc(h);
  }
  assert_eq!(p.allocated(), 0);
  assert_eq!(p.remaining(), 3);
  // freed records are reused, nothing new is materialized
  for _ in 0..3 {
    p.alloc().unwrap();
  }
  assert_eq!(p.materialized(), 3);
}

#[test]
fn test_free_list_is_lifo() {
  let mut p = pool(8);
  let a = p.alloc().unwrap();
  let b = p.alloc().unwrap();
  p.dealloc(a);
  p.dealloc(b);
  assert_eq!(p.alloc().unwrap(), b);
  assert_eq!(p.alloc().unwrap(), a);
}

#[test]
fn test_reserve_hands_out_low_indices_first() {
  let mut p = RecordPool::new(INFO, PoolOptions::new().with_capacity(4).with_reserve(3)).unwrap();
  assert_eq!(p.materialized(), 3);
  assert_eq!(p.allocated(), 0);
  assert_eq!(p.alloc().unwrap(), Handle::new(0));
  assert_eq!(p.alloc().unwrap(), Handle::new(1));
  assert_eq!(p.alloc().unwrap(), Handle::new(2));
  assert_eq!(p.alloc().unwrap(), Handle::new(3));
  assert_eq!(p.materialized(), 4);
}

#[test]
fn test_poison_on_free() {
  let mut p = RecordPool::new(
    INFO,
    PoolOptions::new()
      .with_capacity(2)
      .with_flags(PoolFlags::POISON_ON_FREE),
  )
  .unwrap();
  let h = p.alloc().unwrap();
  p.get_mut(h)[2..].copy_from_slice(&[1, 2, 3, 4]);
  p.dealloc(h);
  assert!(!p.is_live(h));
  // tag verification is off, so the freed record can still be inspected
  assert_eq!(&p.get(h)[2..], &[POISON; 4]);
  assert_eq!(p.get(h)[0], FREE_TAG);
}

#[test]
#[should_panic(expected = "double free")]
fn test_double_free_panics() {
  let mut p = pool(2);
  let h = p.alloc().unwrap();
  p.dealloc(h);
  p.dealloc(h);
}

#[test]
#[should_panic(expected = "Handle::NONE")]
fn test_resolve_none_panics() {
  let p = pool(2);
  p.get(Handle::NONE);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_resolve_out_of_range_panics() {
  let p = pool(2);
  p.get(Handle::new(1));
}

#[test]
#[should_panic(expected = "expected 7")]
fn test_resolve_freed_record_panics() {
  let mut p = pool(2);
  let h = p.alloc().unwrap();
  p.dealloc(h);
  p.get(h);
}
