use {
    super::Service,
    crate::auction::entities,
};

impl Service {
    pub fn get_capacity(&self) -> entities::Capacity {
        entities::Capacity {
            admitted:       self.admission.admitted(),
            max_concurrent: self.admission.max_concurrent(),
        }
    }
}
