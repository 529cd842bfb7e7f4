//! Collaborators backed by the coordination store.

mod etcd;

pub use etcd::EtcdClient;
