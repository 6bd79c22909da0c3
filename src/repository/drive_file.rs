use diesel::prelude::*;

use crate::{
    domain::{
        drive_file::{DriveFile, NewDriveFile},
        types::{CustomerId, DriveFileId},
    },
    models::drive_file::{DriveFile as DbDriveFile, NewDriveFile as DbNewDriveFile},
    repository::{
        DieselRepository, DriveFileReader, DriveFileWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::drive_files,
};

impl DriveFileReader for DieselRepository {
    fn get_drive_file_by_id(&self, id: DriveFileId) -> RepositoryResult<Option<DriveFile>> {
        let mut conn = self.conn()?;

        let file = drive_files::table
            .find(id.get())
            .first::<DbDriveFile>(&mut conn)
            .optional()?;

        file.map(DriveFile::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_drive_files(
        &self,
        customer_id: Option<CustomerId>,
    ) -> RepositoryResult<Vec<DriveFile>> {
        let mut conn = self.conn()?;

        let mut items = drive_files::table.into_boxed();
        if let Some(customer_id) = customer_id {
            items = items.filter(drive_files::customer_id.eq(customer_id.get()));
        }

        items
            .order((drive_files::uploaded_at.desc(), drive_files::id.desc()))
            .load::<DbDriveFile>(&mut conn)?
            .into_iter()
            .map(|row| DriveFile::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl DriveFileWriter for DieselRepository {
    fn create_drive_file(&self, new_file: &NewDriveFile) -> RepositoryResult<DriveFile> {
        let mut conn = self.conn()?;

        let row = diesel::insert_into(drive_files::table)
            .values(DbNewDriveFile::from(new_file))
            .get_result::<DbDriveFile>(&mut conn)?;

        DriveFile::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_drive_file(&self, id: DriveFileId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(drive_files::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
