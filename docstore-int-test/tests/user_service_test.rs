extern crate docstore;

#[cfg(test)]
mod tests {
    use docstore::common::{marshal, unmarshal};
    use docstore::errors::{ErrorKind, StoreError, StoreResult};
    use docstore::{CollectionConfig, Store};
    use docstore_derive::Convertible;
    use docstore_int_test::test_util::temp_store_path;

    #[ctor::ctor]
    fn init() {
        colog::init();
    }

    #[derive(Convertible, Default, Debug, Clone, PartialEq)]
    struct User {
        id: String,
        name: String,
    }

    /// A typed service layered over one collection, the way an application
    /// would use the store.
    struct UserService {
        store: Store,
    }

    impl UserService {
        const COLLECTION: &'static str = "users";

        fn new() -> StoreResult<UserService> {
            let mut store = Store::new();
            store.create_collection(Self::COLLECTION, CollectionConfig::new("id"))?;
            Ok(UserService { store })
        }

        fn from_file(path: &std::path::Path) -> StoreResult<UserService> {
            let store = Store::from_file(path)?;
            store.collection(Self::COLLECTION)?;
            Ok(UserService { store })
        }

        fn create_user(&mut self, id: &str, name: &str) -> StoreResult<User> {
            let users = self.store.collection_mut(Self::COLLECTION)?;
            if users.get(id).is_some() {
                return Err(StoreError::new(
                    &format!("user '{}' already exists", id),
                    ErrorKind::InvalidOperation,
                ));
            }
            let user = User {
                id: id.to_string(),
                name: name.to_string(),
            };
            users.put(marshal(&user)?)?;
            Ok(user)
        }

        fn get_user(&self, id: &str) -> StoreResult<User> {
            let users = self.store.collection(Self::COLLECTION)?;
            match users.get(id) {
                Some(document) => unmarshal(document),
                None => Err(StoreError::new(
                    &format!("user '{}' not found", id),
                    ErrorKind::InvalidOperation,
                )),
            }
        }

        fn list_users(&self) -> StoreResult<Vec<User>> {
            let users = self.store.collection(Self::COLLECTION)?;
            users.list().iter().map(unmarshal).collect()
        }

        fn delete_user(&mut self, id: &str) -> StoreResult<()> {
            let users = self.store.collection_mut(Self::COLLECTION)?;
            if !users.delete(id) {
                return Err(StoreError::new(
                    &format!("user '{}' not found", id),
                    ErrorKind::InvalidOperation,
                ));
            }
            Ok(())
        }
    }

    #[test]
    fn test_user_service_crud() {
        let mut service = UserService::new().unwrap();

        service.create_user("1", "Alice").unwrap();
        service.create_user("2", "Bob").unwrap();
        service.create_user("3", "Caren").unwrap();

        // id conflict
        let err = service.create_user("1", "Ann").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);

        let mut names: Vec<String> = service
            .list_users()
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        names.sort();
        assert_eq!(names, ["Alice", "Bob", "Caren"]);

        let caren = service.get_user("3").unwrap();
        assert_eq!(
            caren,
            User {
                id: "3".to_string(),
                name: "Caren".to_string(),
            }
        );

        service.delete_user("2").unwrap();
        assert!(service.get_user("2").is_err());
        assert_eq!(service.list_users().unwrap().len(), 2);

        let err = service.delete_user("2").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_user_service_persists_across_restart() {
        let (_guard, path) = temp_store_path("users.db");

        let mut service = UserService::new().unwrap();
        service.create_user("1", "Alice").unwrap();
        service.create_user("2", "Bob").unwrap();
        service.store.dump_to_file(&path).unwrap();

        let restarted = UserService::from_file(&path).unwrap();
        assert_eq!(restarted.get_user("1").unwrap().name, "Alice");
        assert_eq!(restarted.list_users().unwrap().len(), 2);
    }
}
