use std::path::Path;

use crate::error::{ReadError, ReadResult};
use crate::reader;

const PASSWD_NAME: usize = 0;
const PASSWD_UID: usize = 2;

/// An account from the password database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: String,
}

impl User {
    pub fn new(id: u32, name: &str) -> Self {
        User {
            id,
            name: name.to_string(),
        }
    }

    /// Finds the account owning `uid` in a `name:passwd:uid:gid:...` file.
    pub fn from_passwd(passwd: &Path, uid: u32) -> ReadResult<Self> {
        let record = reader::try_colon_record(passwd, PASSWD_UID, &uid.to_string())?;
        let name = record.get(PASSWD_NAME).ok_or_else(|| ReadError::MissingField {
            path: passwd.to_path_buf(),
            index: PASSWD_NAME,
        })?;
        Ok(User::new(uid, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn resolves_name_by_uid() {
        let dir = tempfile::tempdir().unwrap();
        let passwd = dir.path().join("passwd");
        fs::write(
            &passwd,
            "root:x:0:0:root:/root:/bin/bash\n\
             daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin\n\
             alice:x:1000:1000::/home/alice:/bin/bash\n",
        )
        .unwrap();

        assert_eq!(User::from_passwd(&passwd, 1000).unwrap(), User::new(1000, "alice"));
        assert_eq!(User::from_passwd(&passwd, 0).unwrap().name, "root");
        assert!(matches!(
            User::from_passwd(&passwd, 4242),
            Err(ReadError::KeyNotFound { .. })
        ));
    }
}
